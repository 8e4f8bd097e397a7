//! Card records and type classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Card type classification as used by the card database.
///
/// Parsing is case-insensitive and total: anything unrecognised becomes
/// [`CardType::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Hero,
    Ally,
    Enemy,
    Location,
    Treachery,
    Quest,
    Attachment,
    Event,
    Objective,
    #[default]
    Unknown,
}

impl CardType {
    /// Classify a type string such as `"hero"` or `"Location"`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hero" => CardType::Hero,
            "ally" => CardType::Ally,
            "enemy" => CardType::Enemy,
            "location" => CardType::Location,
            "treachery" => CardType::Treachery,
            "quest" => CardType::Quest,
            "attachment" => CardType::Attachment,
            "event" => CardType::Event,
            "objective" => CardType::Objective,
            _ => CardType::Unknown,
        }
    }

    /// The lower-case code for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Hero => "hero",
            CardType::Ally => "ally",
            CardType::Enemy => "enemy",
            CardType::Location => "location",
            CardType::Treachery => "treachery",
            CardType::Quest => "quest",
            CardType::Attachment => "attachment",
            CardType::Event => "event",
            CardType::Objective => "objective",
            CardType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card as seen by the portrait pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Card code, e.g. `"01001"`. Matches the image file naming.
    pub code: String,
    pub card_type: CardType,
}

impl CardRecord {
    pub fn new(code: impl Into<String>, card_type: CardType) -> Self {
        Self {
            code: code.into(),
            card_type,
        }
    }
}
