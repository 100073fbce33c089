use core_types::{CoreError, Record, Value};
use database::synthesize;

fn species_name(name: &str, genus: &str) -> Record {
    Record::new()
        .with("species_id", 1)
        .with("language_id", 9)
        .with("name", name)
        .with("genus", genus)
}

#[test]
fn single_update_column_uses_plain_assignment() {
    let record = Record::new().with("id", 1).with("name", "Bulbasaur");
    let statement = synthesize("pokemon_species", &record, &["id"]).unwrap();

    assert_eq!(
        statement.sql,
        r#"INSERT INTO "pokemon_species" ("id", "name") VALUES ($1, $2) ON CONFLICT ("id") DO UPDATE SET "name" = EXCLUDED."name""#
    );
    assert_eq!(
        statement.params,
        vec![Value::Integer(1), Value::Text("Bulbasaur".into())]
    );
}

#[test]
fn multiple_update_columns_use_one_tuple_assignment() {
    let statement = synthesize(
        "pokemon_species_names",
        &species_name("Bulbasaur", "Seed Pokémon"),
        &["species_id", "language_id"],
    )
    .unwrap();

    assert_eq!(
        statement.sql,
        concat!(
            r#"INSERT INTO "pokemon_species_names" ("species_id", "language_id", "name", "genus") "#,
            r#"VALUES ($1, $2, $3, $4) "#,
            r#"ON CONFLICT ("species_id", "language_id") "#,
            r#"DO UPDATE SET ("name", "genus") = (EXCLUDED."name", EXCLUDED."genus")"#
        )
    );
    assert_eq!(statement.params.len(), 4);
}

#[test]
fn key_only_record_does_nothing_on_conflict() {
    let record = Record::new().with("pokemon_id", 1).with("type_id", 12);
    let statement = synthesize("pokemon_types", &record, &["pokemon_id", "type_id"]).unwrap();

    assert!(statement.sql.ends_with(r#"ON CONFLICT ("pokemon_id", "type_id") DO NOTHING"#));
}

#[test]
fn empty_primary_key_is_a_plain_insert() {
    let record = Record::new().with("id", 1);
    let statement = synthesize("move_effects", &record, &[]).unwrap();

    assert_eq!(statement.sql, r#"INSERT INTO "move_effects" ("id") VALUES ($1)"#);
    assert!(!statement.sql.contains("ON CONFLICT"));
}

#[test]
fn update_columns_keep_record_order_when_key_is_not_first() {
    let record = Record::new()
        .with("name", "Bulbasaur")
        .with("id", 1)
        .with("genus", "Seed");
    let statement = synthesize("species", &record, &["id"]).unwrap();

    assert!(statement.sql.contains(r#"SET ("name", "genus") = (EXCLUDED."name", EXCLUDED."genus")"#));
    assert_eq!(statement.params[1], Value::Integer(1));
}

#[test]
fn values_are_never_interpolated() {
    let hostile = "x'); DROP TABLE pokemon; --";
    let record = Record::new().with("id", 1).with("identifier", hostile);
    let statement = synthesize("pokemon", &record, &["id"]).unwrap();

    assert!(!statement.sql.contains("DROP TABLE"));
    assert_eq!(statement.params[1], Value::Text(hostile.to_string()));
}

#[test]
fn null_values_are_bound_not_written() {
    let record = Record::new()
        .with("id", 1)
        .with("form_identifier", Value::Null);
    let statement = synthesize("pokemon_forms", &record, &["id"]).unwrap();

    assert!(!statement.sql.contains("NULL"));
    assert_eq!(statement.params[1], Value::Null);
}

#[test]
fn empty_record_is_rejected() {
    let err = synthesize("languages", &Record::new(), &["id"]).unwrap_err();
    assert_eq!(
        err,
        CoreError::EmptyRecord {
            table: "languages".into()
        }
    );
}
