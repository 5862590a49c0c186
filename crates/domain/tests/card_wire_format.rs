//! Wire-format checks for the JSON shape consumed by the web client.

use cardledger_domain::utils::time::from_millis;
use cardledger_domain::{Card, CardLedgerError, CardStats, ValidationFailure};
use serde_json::json;

fn stored_card() -> Card {
    let created = from_millis(1_734_000_000_123).unwrap();
    Card {
        id: "0193b1c2-aaaa-7bbb-8ccc-123456789abc".into(),
        recipient_name: "Grace Hopper".into(),
        address: "1 Navy Way".into(),
        email: Some("grace@example.com".into()),
        phone_number: None,
        card_sent: true,
        notes: Some("Send early".into()),
        date_sent: from_millis(1_734_500_000_000),
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn card_json_uses_client_field_names() {
    let value = serde_json::to_value(stored_card()).unwrap();

    assert_eq!(
        value,
        json!({
            "id": "0193b1c2-aaaa-7bbb-8ccc-123456789abc",
            "recipientName": "Grace Hopper",
            "address": "1 Navy Way",
            "email": "grace@example.com",
            "phoneNumber": null,
            "cardSent": true,
            "notes": "Send early",
            "dateSent": "2024-12-18T05:33:20.000Z",
            "createdAt": "2024-12-12T10:40:00.123Z",
            "updatedAt": "2024-12-12T10:40:00.123Z"
        })
    );
}

#[test]
fn card_json_parses_back() {
    let card = stored_card();
    let text = serde_json::to_string(&card).unwrap();
    let parsed: Card = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, card);
}

#[test]
fn stats_and_errors_serialize_for_clients() {
    let stats = serde_json::to_value(CardStats::from_counts(3, 1)).unwrap();
    assert_eq!(stats, json!({"total": 3, "sent": 1, "remaining": 2}));

    let err = CardLedgerError::Validation(ValidationFailure::single("address", "is required"));
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["type"], "Validation");
    assert_eq!(value["message"]["violations"][0]["field"], "address");
}
