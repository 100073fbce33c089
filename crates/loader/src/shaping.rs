//! Per-table shaping rules.
//!
//! Each rule maps one normalized CSV row to the exact record written to its
//! table. `Ok(None)` skips the row. Optional source fields that are absent are
//! left out of the record entirely rather than written as NULL.

use core_types::{CoreError, Record, SourceRow, Value};

/// A shaping rule for one table.
pub type Shaper = fn(&SourceRow) -> Result<Option<Record>, CoreError>;

/// Species ids that are classified as Ultra Beasts regardless of the source data.
pub const ULTRA_BEASTS: [i64; 11] = [793, 794, 795, 796, 797, 798, 799, 803, 804, 805, 806];

/// `moves.damage_class_id` when the source leaves it out.
pub const DEFAULT_DAMAGE_CLASS_ID: i64 = 2;

/// `moves.effect_id` when the source leaves it out.
pub const DEFAULT_EFFECT_ID: i64 = 1;

pub fn is_ultra_beast(species_id: Option<i64>) -> bool {
    species_id.is_some_and(|id| ULTRA_BEASTS.contains(&id))
}

/// Rows of `id,identifier` lookup tables (triggers, targets, damage classes, types).
pub fn identified(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("identifier", row.require("identifier")?),
    ))
}

pub fn language(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("iso639", row.require("iso639")?)
            .with("iso3166", row.require("iso3166")?)
            .with("identifier", row.require("identifier")?)
            .with("official", row.flag("official")),
    ))
}

pub fn pokemon_species(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("identifier", row.require("identifier")?)
            .with("is_legendary", row.flag("is_legendary"))
            .with("is_mythical", row.flag("is_mythical"))
            .with("is_ultra_beast", is_ultra_beast(row.integer("id"))),
    ))
}

pub fn pokemon_species_name(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("species_id", row.require("pokemon_species_id")?)
            .with("language_id", row.require("local_language_id")?)
            .with("name", row.require("name")?)
            .with_optional("genus", row.optional("genus")),
    ))
}

pub fn pokemon_species_flavor_text(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("species_id", row.require("species_id")?)
            .with("language_id", row.require("language_id")?)
            .with("flavor_text", row.require("flavor_text")?),
    ))
}

pub fn pokemon(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("identifier", row.require("identifier")?)
            .with("species_id", row.require("species_id")?)
            .with("height", row.require("height")?)
            .with("weight", row.require("weight")?)
            .with("base_experience", row.require("base_experience")?)
            .with("is_default", row.flag("is_default")),
    ))
}

pub fn item(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("identifier", row.require("identifier")?)
            .with("cost", row.require("cost")?),
    ))
}

pub fn move_effect(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(Record::new().with("id", row.require("id")?)))
}

pub fn pokemon_move(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("identifier", row.require("identifier")?)
            .with("type_id", row.require("type_id")?)
            .with_optional("power", row.optional("power"))
            .with_optional("pp", row.optional("pp"))
            .with_optional("accuracy", row.optional("accuracy"))
            .with("priority", row.require("priority")?)
            .with("target_id", row.require("target_id")?)
            .with(
                "damage_class_id",
                row.optional("damage_class_id")
                    .unwrap_or(Value::Integer(DEFAULT_DAMAGE_CLASS_ID)),
            )
            .with(
                "effect_id",
                row.optional("effect_id")
                    .unwrap_or(Value::Integer(DEFAULT_EFFECT_ID)),
            )
            .with_optional("effect_chance", row.optional("effect_chance")),
    ))
}

pub fn pokemon_evolution(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("evolved_species_id", row.require("evolved_species_id")?)
            .with("evolution_trigger_id", row.require("evolution_trigger_id")?)
            .with_optional("trigger_item_id", row.optional("trigger_item_id"))
            .with_optional("minimum_level", row.optional("minimum_level"))
            .with_optional("held_item_id", row.optional("held_item_id"))
            .with_optional("time_of_day", row.optional("time_of_day"))
            .with_optional("known_move_id", row.optional("known_move_id"))
            .with_optional("known_move_type_id", row.optional("known_move_type_id"))
            .with_optional("minimum_happiness", row.optional("minimum_happiness")),
    ))
}

pub fn pokemon_type(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("pokemon_id", row.require("pokemon_id")?)
            .with("type_id", row.require("type_id")?),
    ))
}

/// Forms are loaded switched off; `enabled`, `allow_catch` and `allow_redeem`
/// are always written as false.
pub fn pokemon_form(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    Ok(Some(
        Record::new()
            .with("id", row.require("id")?)
            .with("identifier", row.require("identifier")?)
            .with("form_identifier", row.text_or_null("form_identifier"))
            .with("pokemon_id", row.require("pokemon_id")?)
            .with("is_default", row.flag("is_default"))
            .with("is_mega", row.flag("is_mega"))
            .with("enabled", false)
            .with("allow_catch", false)
            .with("allow_redeem", false),
    ))
}

/// Skips rows that carry neither a form name nor a Pokémon name.
pub fn pokemon_form_name(row: &SourceRow) -> Result<Option<Record>, CoreError> {
    if !row.contains("form_name") && !row.contains("pokemon_name") {
        return Ok(None);
    }
    Ok(Some(
        Record::new()
            .with("form_id", row.require("pokemon_form_id")?)
            .with("language_id", row.require("local_language_id")?)
            .with_optional("form_name", row.optional("form_name"))
            .with_optional("pokemon_name", row.optional("pokemon_name")),
    ))
}
