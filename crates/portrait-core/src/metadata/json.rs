//! RingsDB-style JSON card lists.
//!
//! The document is an array of card objects. Only `code` and `type_code`
//! are read; everything else in the object is ignored.

use serde_json::Value;

use super::ParseFailure;
use crate::card::{CardRecord, CardType};

/// Parse a JSON card array into records.
///
/// Objects without a string `code` are skipped. A missing or non-string
/// `type_code` classifies the card as [`CardType::Unknown`].
///
/// # Errors
///
/// Returns [`ParseFailure`] if the text is not valid JSON or the top level
/// is not an array. No records are recovered in that case.
pub fn parse_json(text: &str) -> Result<Vec<CardRecord>, ParseFailure> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ParseFailure::new(e.to_string()))?;

    let Value::Array(cards) = document else {
        return Err(ParseFailure::new("expected a JSON array of cards"));
    };

    let mut records = Vec::with_capacity(cards.len());
    for (position, card) in cards.iter().enumerate() {
        let Some(code) = card.get("code").and_then(Value::as_str) else {
            tracing::debug!(position, "skipping card without a code");
            continue;
        };
        let card_type = card
            .get("type_code")
            .and_then(Value::as_str)
            .map(CardType::from_code)
            .unwrap_or_default();
        records.push(CardRecord::new(code, card_type));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cards() {
        let text = r#"[
            {"code": "01001", "name": "Aragorn", "type_code": "hero", "pack_code": "Core"},
            {"code": "01074", "name": "King Spider", "type_code": "enemy"},
            {"code": "01095", "type_code": "location"}
        ]"#;
        let records = parse_json(text).unwrap();

        assert_eq!(
            records,
            vec![
                CardRecord::new("01001", CardType::Hero),
                CardRecord::new("01074", CardType::Enemy),
                CardRecord::new("01095", CardType::Location),
            ]
        );
    }

    #[test]
    fn test_missing_type_code_is_unknown() {
        let records = parse_json(r#"[{"code": "01120"}, {"code": "01121", "type_code": null}]"#)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.card_type == CardType::Unknown));
    }

    #[test]
    fn test_cards_without_code_are_skipped() {
        let records =
            parse_json(r#"[{"type_code": "hero"}, {"code": 17}, {"code": "01002"}]"#).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "01002");
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_json(r#"[{"code": "01001""#).unwrap_err();
        assert!(err.recovered.is_empty());
    }

    #[test]
    fn test_non_array_top_level() {
        let err = parse_json(r#"{"code": "01001"}"#).unwrap_err();
        assert_eq!(err.message, "expected a JSON array of cards");
    }
}
