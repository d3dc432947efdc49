use chrono::NaiveDate;
use tasklist_core::Item;

fn created_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 13)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

#[test]
fn item_serialization_uses_expected_fields() {
    let mut item = Item::new("ship release", created_at()).unwrap();
    item.mark_done();

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["title"], "ship release");
    assert_eq!(json["done"], true);
    assert_eq!(json["created_at"], "2026-02-13T10:00:00");

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_trims_title_and_defaults_done() {
    let value = serde_json::json!({
        "title": "  padded  ",
        "created_at": "2026-02-13T10:00:00"
    });

    let item: Item = serde_json::from_value(value).unwrap();
    assert_eq!(item.title(), "padded");
    assert!(!item.is_done());
}

#[test]
fn deserialize_rejects_blank_title() {
    let value = serde_json::json!({
        "title": "   ",
        "done": false,
        "created_at": "2026-02-13T10:00:00"
    });

    let err = serde_json::from_value::<Item>(value).unwrap_err();
    assert!(
        err.to_string().contains("Task title cannot be empty."),
        "unexpected error: {err}"
    );
}
