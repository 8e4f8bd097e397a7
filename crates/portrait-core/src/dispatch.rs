//! Crop rectangle selection.
//!
//! Only two portrait layouts exist. Location cards put their art lower and
//! narrower than every other card frame; everything else, including quest
//! cards and cards missing from the metadata, uses the wide box.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::card::CardType;
use crate::metadata::MetadataIndex;
use crate::transform::CropRect;

/// Wide portrait box for character-like card frames: 290x290.
pub const WIDE_BOX: CropRect = match CropRect::new(134, 10, 424, 300) {
    Ok(rect) => rect,
    Err(_) => panic!("wide box is not a valid rectangle"),
};

/// Narrow portrait box for location card frames: 230x230.
pub const NARROW_BOX: CropRect = match CropRect::new(104, 87, 334, 317) {
    Ok(rect) => rect,
    Err(_) => panic!("narrow box is not a valid rectangle"),
};

/// Which of the two portrait boxes a card uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropLayout {
    Wide,
    Narrow,
}

impl CropLayout {
    /// Layout for a card type.
    pub fn for_card_type(card_type: CardType) -> Self {
        match card_type {
            CardType::Location => CropLayout::Narrow,
            _ => CropLayout::Wide,
        }
    }
}

impl fmt::Display for CropLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropLayout::Wide => f.write_str("wide"),
            CropLayout::Narrow => f.write_str("narrow"),
        }
    }
}

/// The configured rectangle for each layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropBoxes {
    pub wide: CropRect,
    pub narrow: CropRect,
}

impl Default for CropBoxes {
    fn default() -> Self {
        Self {
            wide: WIDE_BOX,
            narrow: NARROW_BOX,
        }
    }
}

impl CropBoxes {
    pub fn rect(&self, layout: CropLayout) -> CropRect {
        match layout {
            CropLayout::Wide => self.wide,
            CropLayout::Narrow => self.narrow,
        }
    }
}

/// Outcome of dispatching one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub card_type: CardType,
    pub layout: CropLayout,
    pub rect: CropRect,
}

/// Choose the crop rectangle for `code`.
///
/// Total over all codes: anything absent from `index` is
/// [`CardType::Unknown`] and gets the wide box.
pub fn dispatch(code: &str, index: &MetadataIndex, boxes: &CropBoxes) -> Dispatch {
    let card_type = index.card_type(code);
    let layout = CropLayout::for_card_type(card_type);
    Dispatch {
        card_type,
        layout,
        rect: boxes.rect(layout),
    }
}

/// Card code embedded in an image file name.
///
/// The code is the file stem up to the first `_`, so both `01074.png` and
/// `01001_Aragorn.png` resolve. Returns `None` for an empty code.
pub fn card_code(path: &Path) -> Option<&str> {
    let stem = path.file_stem()?.to_str()?;
    let code = stem.split('_').next().unwrap_or(stem).trim();
    (!code.is_empty()).then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardRecord;

    fn index() -> MetadataIndex {
        [
            CardRecord::new("01001", CardType::Hero),
            CardRecord::new("01074", CardType::Enemy),
            CardRecord::new("01077", CardType::Location),
            CardRecord::new("01119", CardType::Quest),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_location_gets_narrow_box() {
        let d = dispatch("01077", &index(), &CropBoxes::default());

        assert_eq!(d.card_type, CardType::Location);
        assert_eq!(d.layout, CropLayout::Narrow);
        assert_eq!(d.rect, NARROW_BOX);
    }

    #[test]
    fn test_other_types_get_wide_box() {
        let index = index();
        for code in ["01001", "01074", "01119"] {
            let d = dispatch(code, &index, &CropBoxes::default());
            assert_eq!(d.layout, CropLayout::Wide, "code {code}");
            assert_eq!(d.rect, WIDE_BOX);
        }
    }

    #[test]
    fn test_absent_code_gets_wide_box() {
        let d = dispatch("99999", &index(), &CropBoxes::default());

        assert_eq!(d.card_type, CardType::Unknown);
        assert_eq!(d.rect, WIDE_BOX);
    }

    #[test]
    fn test_box_constants() {
        assert_eq!(WIDE_BOX.dimensions(), (290, 290));
        assert_eq!(NARROW_BOX.dimensions(), (230, 230));
        assert_eq!(<[u32; 4]>::from(WIDE_BOX), [134, 10, 424, 300]);
        assert_eq!(<[u32; 4]>::from(NARROW_BOX), [104, 87, 334, 317]);
    }

    #[test]
    fn test_custom_boxes() {
        let boxes = CropBoxes {
            wide: CropRect::new(0, 0, 10, 10).unwrap(),
            narrow: CropRect::new(5, 5, 25, 25).unwrap(),
        };

        assert_eq!(dispatch("01077", &index(), &boxes).rect.dimensions(), (20, 20));
        assert_eq!(dispatch("01001", &index(), &boxes).rect.dimensions(), (10, 10));
    }

    #[test]
    fn test_boxes_deserialize_with_defaults() {
        let boxes: CropBoxes = serde_json::from_str(r#"{"narrow": [0, 0, 50, 60]}"#).unwrap();

        assert_eq!(boxes.wide, WIDE_BOX);
        assert_eq!(boxes.narrow.dimensions(), (50, 60));
    }

    #[test]
    fn test_card_code_from_file_name() {
        assert_eq!(card_code(Path::new("cards/01074.png")), Some("01074"));
        assert_eq!(card_code(Path::new("01001_Aragorn.png")), Some("01001"));
        assert_eq!(card_code(Path::new("01002_Theodred_Heir.jpg")), Some("01002"));
        assert_eq!(card_code(Path::new("_Aragorn.png")), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::card::CardRecord;
    use proptest::prelude::*;

    fn card_type_strategy() -> impl Strategy<Value = CardType> {
        prop_oneof![
            Just(CardType::Hero),
            Just(CardType::Ally),
            Just(CardType::Enemy),
            Just(CardType::Location),
            Just(CardType::Treachery),
            Just(CardType::Quest),
            Just(CardType::Attachment),
            Just(CardType::Event),
            Just(CardType::Objective),
            Just(CardType::Unknown),
        ]
    }

    proptest! {
        /// Property: Narrow if and only if the indexed type is location.
        #[test]
        fn prop_narrow_iff_location(
            code in "[0-9]{5}",
            card_type in card_type_strategy(),
        ) {
            let index: MetadataIndex = [CardRecord::new(code.clone(), card_type)].into_iter().collect();
            let d = dispatch(&code, &index, &CropBoxes::default());

            let expected = if card_type == CardType::Location { NARROW_BOX } else { WIDE_BOX };
            prop_assert_eq!(d.rect, expected);
        }

        /// Property: Codes missing from the index always get the wide box.
        #[test]
        fn prop_absent_codes_are_wide(code in "[a-z0-9]{1,8}") {
            let d = dispatch(&code, &MetadataIndex::new(), &CropBoxes::default());
            prop_assert_eq!(d.layout, CropLayout::Wide);
        }
    }
}
