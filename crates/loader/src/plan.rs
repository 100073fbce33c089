//! The load plan: which source feeds which table, and in what order.
//!
//! Order is the only thing standing between the loader and a foreign-key
//! violation, so each entry also lists the tables it references and
//! `LoadPlan::new` refuses any plan where a reference is not loaded first.

use crate::error::PlanError;
use crate::shaping::{self, Shaper};
use std::collections::HashSet;
use std::fmt;

/// One table-load step.
#[derive(Clone, Copy)]
pub struct PlanEntry {
    /// CSV file name, relative to the data directory.
    pub source: &'static str,
    pub table: &'static str,
    /// Conflict key; empty means a plain insert.
    pub primary_key: &'static [&'static str],
    /// Tables this one holds foreign keys into.
    pub references: &'static [&'static str],
    pub shape: Shaper,
}

impl fmt::Debug for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanEntry")
            .field("source", &self.source)
            .field("table", &self.table)
            .field("primary_key", &self.primary_key)
            .field("references", &self.references)
            .finish_non_exhaustive()
    }
}

const ID: &[&str] = &["id"];

/// The Pokédex load order.
pub static POKEDEX_PLAN: [PlanEntry; 16] = [
    PlanEntry {
        source: "languages.csv",
        table: "languages",
        primary_key: ID,
        references: &[],
        shape: shaping::language,
    },
    PlanEntry {
        source: "pokemon_species.csv",
        table: "pokemon_species",
        primary_key: ID,
        references: &[],
        shape: shaping::pokemon_species,
    },
    PlanEntry {
        source: "pokemon_species_names.csv",
        table: "pokemon_species_names",
        primary_key: &["species_id", "language_id"],
        references: &["pokemon_species", "languages"],
        shape: shaping::pokemon_species_name,
    },
    PlanEntry {
        source: "pokemon_species_flavor_text.csv",
        table: "pokemon_species_flavor_text",
        primary_key: &["species_id", "language_id"],
        references: &["pokemon_species", "languages"],
        shape: shaping::pokemon_species_flavor_text,
    },
    PlanEntry {
        source: "pokemon.csv",
        table: "pokemon",
        primary_key: ID,
        references: &["pokemon_species"],
        shape: shaping::pokemon,
    },
    PlanEntry {
        source: "evolution_triggers.csv",
        table: "evolution_triggers",
        primary_key: ID,
        references: &[],
        shape: shaping::identified,
    },
    PlanEntry {
        source: "items.csv",
        table: "items",
        primary_key: ID,
        references: &[],
        shape: shaping::item,
    },
    PlanEntry {
        source: "move_targets.csv",
        table: "move_targets",
        primary_key: ID,
        references: &[],
        shape: shaping::identified,
    },
    PlanEntry {
        source: "move_damage_classes.csv",
        table: "damage_classes",
        primary_key: ID,
        references: &[],
        shape: shaping::identified,
    },
    PlanEntry {
        source: "types.csv",
        table: "types",
        primary_key: ID,
        references: &[],
        shape: shaping::identified,
    },
    PlanEntry {
        source: "move_effects.csv",
        table: "move_effects",
        primary_key: ID,
        references: &[],
        shape: shaping::move_effect,
    },
    PlanEntry {
        source: "moves.csv",
        table: "moves",
        primary_key: ID,
        references: &["types", "move_targets", "damage_classes", "move_effects"],
        shape: shaping::pokemon_move,
    },
    PlanEntry {
        source: "pokemon_evolution.csv",
        table: "pokemon_evolutions",
        primary_key: ID,
        references: &["pokemon_species", "evolution_triggers", "items", "moves", "types"],
        shape: shaping::pokemon_evolution,
    },
    PlanEntry {
        source: "pokemon_types.csv",
        table: "pokemon_types",
        primary_key: &["pokemon_id", "type_id"],
        references: &["pokemon", "types"],
        shape: shaping::pokemon_type,
    },
    PlanEntry {
        source: "pokemon_forms.csv",
        table: "pokemon_forms",
        primary_key: ID,
        references: &["pokemon"],
        shape: shaping::pokemon_form,
    },
    PlanEntry {
        source: "pokemon_form_names.csv",
        table: "pokemon_form_names",
        primary_key: &["form_id", "language_id"],
        references: &["pokemon_forms", "languages"],
        shape: shaping::pokemon_form_name,
    },
];

/// An ordered, immutable list of table-load steps.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    entries: Vec<PlanEntry>,
}

impl LoadPlan {
    /// Builds a plan, rejecting duplicate tables and references to tables that
    /// are not loaded earlier in the plan.
    pub fn new(entries: Vec<PlanEntry>) -> Result<Self, PlanError> {
        let mut loaded = HashSet::new();
        for entry in &entries {
            if let Some(reference) = entry
                .references
                .iter()
                .copied()
                .find(|reference| !loaded.contains(reference))
            {
                return Err(PlanError::ReferenceNotLoaded {
                    table: entry.table,
                    reference,
                });
            }
            if !loaded.insert(entry.table) {
                return Err(PlanError::DuplicateTable(entry.table));
            }
        }
        Ok(Self { entries })
    }

    /// Builds a plan without checking its order.
    ///
    /// A mis-ordered plan is caught by the database instead, on the first row
    /// that needs a missing reference.
    pub fn new_unchecked(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// The standard Pokédex plan.
    pub fn pokedex() -> Self {
        Self::new_unchecked(POKEDEX_PLAN.to_vec())
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_for_table(&self, table: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|entry| entry.table == table)
    }
}
