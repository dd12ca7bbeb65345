use graphstack_types::{ChangeSet, NodeKind, Record, Timestamp};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── NodeKind ─────────────────────────────────────────────────────

#[test]
fn kind_string_roundtrip() {
    for kind in [NodeKind::Entity, NodeKind::Action, NodeKind::Bond] {
        let parsed: NodeKind = kind.as_str().parse().unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn kind_unknown_string_is_rejected() {
    let err = "widget".parse::<NodeKind>().unwrap_err();
    assert!(err.to_string().contains("widget"));
}

#[test]
fn kind_serde_uses_lowercase_form() {
    let json = serde_json::to_string(&NodeKind::Bond).unwrap();
    assert_eq!(json, "\"bond\"");
}

// ── Record ───────────────────────────────────────────────────────

#[test]
fn constructors_set_the_kind() {
    assert_eq!(Record::entity("user").kind, NodeKind::Entity);
    assert_eq!(Record::action("clicked").kind, NodeKind::Action);
    assert_eq!(Record::bond("follows").kind, NodeKind::Bond);
}

#[test]
fn new_record_has_no_properties() {
    let record = Record::entity("user");
    assert!(record.properties.is_empty());
    assert_eq!(record.node_type, "user");
}

#[test]
fn set_and_get_property() {
    let mut record = Record::entity("user");
    record.set_property("active", true);
    record.set_property("age", 42);
    assert_eq!(record.property("active"), Some(&json!(true)));
    assert_eq!(record.property("age"), Some(&json!(42)));
    assert_eq!(record.property("missing"), None);
}

#[test]
fn set_property_replaces_previous_value() {
    let mut record = Record::entity("user");
    record.set_property("active", true);
    record.set_property("active", false);
    assert_eq!(record.property("active"), Some(&json!(false)));
}

#[test]
fn remove_property_returns_previous_value() {
    let mut record = Record::entity("user");
    record.set_property("active", true);
    assert_eq!(record.remove_property("active"), Some(json!(true)));
    assert_eq!(record.property("active"), None);
}

#[test]
fn with_property_builds_inline() {
    let record = Record::entity("user")
        .with_property("active", true)
        .with_property("name", "ada");
    assert_eq!(record.property("active"), Some(&json!(true)));
    assert_eq!(record.property("name"), Some(&json!("ada")));
}

#[test]
fn record_serde_roundtrip() {
    let record = Record::bond("follows").with_property("weight", 3);
    let json = serde_json::to_string(&record).unwrap();
    let parsed: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(record, parsed);
}

// ── Timestamp ────────────────────────────────────────────────────

#[test]
fn timestamp_now_is_recent() {
    let ts = Timestamp::now();
    assert!(ts.as_millis() > 1_600_000_000_000); // after 2020
}

#[test]
fn timestamp_orders_by_millis() {
    let a = Timestamp::from_millis(100);
    let b = Timestamp::from_millis(200);
    assert!(a < b);
}

// ── ChangeSet ────────────────────────────────────────────────────

#[test]
fn change_set_empty_and_len() {
    let mut changes = ChangeSet::new();
    assert!(changes.is_empty());
    assert_eq!(changes.len(), 0);

    changes.inserted.push(Record::entity("user"));
    changes.archived.push(Record::action("clicked"));
    assert!(!changes.is_empty());
    assert_eq!(changes.len(), 2);
}
