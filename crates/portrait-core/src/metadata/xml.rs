//! Set-file style XML card lists.
//!
//! Cards are `card` elements carrying `property` children with `name` and
//! `value` attributes:
//!
//! ```xml
//! <set>
//!   <cards>
//!     <card name="Aragorn">
//!       <property name="Card Number" value="1" />
//!       <property name="Type" value="Hero" />
//!     </card>
//!   </cards>
//! </set>
//! ```
//!
//! The card number is numeric within a set, so the code used for image
//! file names is synthesized as `prefix + zero-padded number`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ParseFailure;
use crate::card::{CardRecord, CardType};

/// Default set prefix for synthesized card codes.
pub const DEFAULT_CODE_PREFIX: &str = "01";

const CARD_NUMBER: &str = "Card Number";
const TYPE: &str = "Type";

/// Properties collected for the card currently being read.
#[derive(Debug, Default)]
struct PendingCard {
    number: Option<String>,
    card_type: Option<String>,
}

impl PendingCard {
    fn finish(self, code_prefix: &str) -> Option<CardRecord> {
        let number = self.number.filter(|n| !n.trim().is_empty())?;
        let card_type = self
            .card_type
            .map(|t| CardType::from_code(&t))
            .unwrap_or_default();
        Some(CardRecord::new(synthesize_code(code_prefix, &number), card_type))
    }
}

/// Build a card code from a set prefix and a card number: `("01", "7")`
/// becomes `"01007"`.
pub fn synthesize_code(code_prefix: &str, number: &str) -> String {
    format!("{code_prefix}{:0>3}", number.trim())
}

/// Parse an XML card list into records.
///
/// # Errors
///
/// Returns [`ParseFailure`] on malformed XML. Cards closed before the
/// error are carried in [`ParseFailure::recovered`].
pub fn parse_xml(text: &str, code_prefix: &str) -> Result<Vec<CardRecord>, ParseFailure> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<PendingCard> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let message = format!("{e} (at byte {})", reader.buffer_position());
                return Err(ParseFailure::with_recovered(message, records));
            }
        };

        match event {
            Event::Start(e) if e.name().as_ref() == b"card" => {
                current = Some(PendingCard::default());
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"property" => {
                let Some(card) = current.as_mut() else {
                    continue;
                };
                let (name, value) = match read_property(&e) {
                    Ok(pair) => pair,
                    Err(message) => return Err(ParseFailure::with_recovered(message, records)),
                };
                match name.as_str() {
                    CARD_NUMBER => card.number = Some(value),
                    TYPE => card.card_type = Some(value),
                    _ => {}
                }
            }
            Event::End(e) if e.name().as_ref() == b"card" => {
                if let Some(card) = current.take() {
                    match card.finish(code_prefix) {
                        Some(record) => records.push(record),
                        None => tracing::debug!("skipping card without a card number"),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

/// Read the `name` and `value` attributes of a `property` element.
fn read_property(element: &BytesStart<'_>) -> Result<(String, String), String> {
    let mut name = String::new();
    let mut value = String::new();

    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        match attr.key.as_ref() {
            b"name" => name = attr.unescape_value().map_err(|e| e.to_string())?.into_owned(),
            b"value" => value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned(),
            _ => {}
        }
    }

    Ok((name, value))
}
