//! End-to-end query assembly scenarios.

use serde_json::json;
use twinql::{
    not, of_model, property, CountAllTwins, ModelSchema, PropertyKind, Query, QueryBuildError,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn room() -> ModelSchema {
    ModelSchema::new("Room", "dtmi:example:Room;1")
        .with_property("Temperature", "Temperature", PropertyKind::Float)
        .with_property("Status", "Status", PropertyKind::String)
        .with_property("Region", "Region", PropertyKind::String)
        .with_property("Occupied", "Occupied", PropertyKind::Bool)
}

#[test]
fn empty_query_renders_from_only() {
    let query = Query::from_twins("t");
    assert_eq!(query.build_query(), "FROM DIGITALTWINS t");
}

#[test]
fn count_all_twins_query() {
    assert_eq!(
        CountAllTwins::new().build_query(),
        "SELECT COUNT() FROM DIGITALTWINS"
    );
}

#[test]
fn comparison_conjunction_scenario() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .where_predicate(
            &property("t", "Temperature")
                .gt(50)
                .and(property("t", "Status").eq("Active")),
        )
        .unwrap();
    assert_eq!(
        query.build_query(),
        "FROM DIGITALTWINS t WHERE t.Temperature > 50 AND t.Status = 'Active'"
    );
}

#[test]
fn membership_scenario() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .where_predicate(&property("t", "Region").is_in(vec![json!("NA"), json!("EU")]))
        .unwrap();
    assert_eq!(
        query.build_query(),
        "FROM DIGITALTWINS t WHERE t.Region IN ['NA','EU']"
    );
}

#[test]
fn selecting_an_alias_twice_fails() {
    let mut query = Query::from_twins("t");
    query.select("t").unwrap();
    let err = query.select("t").unwrap_err();
    assert_eq!(err, QueryBuildError::DuplicateAlias("t".to_string()));
}

#[test]
fn full_query_with_projection_join_and_filter() -> anyhow::Result<()> {
    init_logging();
    let sensor = ModelSchema::new("Sensor", "dtmi:example:Sensor;1")
        .with_property("Unit", "Unit", PropertyKind::String);
    let mut query = Query::from_twins_model(&room(), Some("room"));
    // Target alias only becomes selectable after the join binds it.
    assert!(query.select("sensor").is_err());
    query.join_related_model("room", "hosts", &sensor, "sensor", "rel")?;
    query.select("sensor")?;
    query
        .where_predicate(&of_model("room", "dtmi:example:Room;1"))?
        .where_predicate(&property("sensor", "Unit").eq("Celsius"))?;
    assert_eq!(
        query.build_query(),
        "SELECT sensor FROM DIGITALTWINS room \
         JOIN sensor RELATED room.hosts rel \
         WHERE IS_OF_MODEL(room, 'dtmi:example:Room;1') AND sensor.Unit = 'Celsius'"
    );
    Ok(())
}

#[test]
fn mixed_and_or_always_parenthesizes_the_nested_group() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .where_predicate(
            &property("t", "Temperature").gt(50).and(
                property("t", "Status")
                    .eq("Active")
                    .or(property("t", "Occupied").eq(true)),
            ),
        )
        .unwrap();
    assert_eq!(
        query.build_query(),
        "FROM DIGITALTWINS t WHERE t.Temperature > 50 AND (t.Status = 'Active' OR t.Occupied = true)"
    );
}

#[test]
fn negation_scenario() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .where_predicate(&not(property("t", "Status").eq("Retired")))
        .unwrap();
    assert_eq!(
        query.build_query(),
        "FROM DIGITALTWINS t WHERE NOT(t.Status = 'Retired')"
    );
}

#[test]
fn string_literals_are_quoted_and_escaped() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .where_predicate(&property("t", "Status").eq("O'Brien's"))
        .unwrap();
    assert_eq!(
        query.build_query(),
        "FROM DIGITALTWINS t WHERE t.Status = 'O\\'Brien\\'s'"
    );
}

#[test]
fn top_query() {
    let mut query = Query::from_twins("t");
    query.top(5).unwrap();
    assert_eq!(query.build_query(), "SELECT TOP(5) FROM DIGITALTWINS t");
}

#[test]
fn count_query_over_filtered_twins() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .count()
        .unwrap()
        .where_predicate(&property("t", "Occupied").eq(true))
        .unwrap();
    assert_eq!(
        query.build_query(),
        "SELECT COUNT() FROM DIGITALTWINS t WHERE t.Occupied = true"
    );
}

#[test]
fn relationship_collection_query() {
    let mut query = Query::from_relationships("r");
    query
        .where_predicate(&property("r", "maintainedBy").eq("svc-team"))
        .unwrap();
    assert_eq!(
        query.build_query(),
        "FROM RELATIONSHIPS r WHERE r.maintainedBy = 'svc-team'"
    );
}

#[test]
fn repeated_rendering_is_byte_identical() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    query
        .select("t")
        .unwrap()
        .where_predicate(&property("t", "Temperature").gt(50))
        .unwrap();
    let first = query.build_query();
    let second = query.build_query();
    assert_eq!(first, second);
}

#[test]
fn identical_construction_yields_identical_text() {
    let build = || {
        let mut query = Query::from_twins_model(&room(), Some("t"));
        query
            .where_predicate(
                &property("t", "Temperature")
                    .gt(50)
                    .and(not(property("t", "Region").is_in(vec![json!("APAC")]))),
            )
            .unwrap();
        query.build_query()
    };
    assert_eq!(build(), build());
}

#[test]
fn no_partial_query_after_failed_mutation() {
    let mut query = Query::from_twins_model(&room(), Some("t"));
    let before = query.build_query();
    assert!(query
        .where_predicate(&property("t", "Pressure").gt(1))
        .is_err());
    assert!(query.join_related("ghost", "contains", "x", "r").is_err());
    assert_eq!(query.build_query(), before);
}
