//! Read-only lookup from card code to card type.

use std::collections::HashMap;

use crate::card::{CardRecord, CardType};

/// Mapping from card code to [`CardType`], built once per run.
///
/// Lookups are total: a code that was never loaded resolves to
/// [`CardType::Unknown`].
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    types: HashMap<String, CardType>,
}

impl MetadataIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one record, returning the type it replaced if the code was
    /// already present.
    pub fn insert(&mut self, record: CardRecord) -> Option<CardType> {
        self.types.insert(record.code, record.card_type)
    }

    /// Merge records from one source. Later records replace earlier ones
    /// with the same code.
    pub fn extend<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = CardRecord>,
    {
        let mut added = 0;
        for record in records {
            let code = record.code.clone();
            let new_type = record.card_type;
            match self.insert(record) {
                Some(previous) if previous != new_type => {
                    tracing::debug!(%code, %previous, replacement = %new_type, "card type replaced");
                }
                Some(_) => {}
                None => added += 1,
            }
        }
        added
    }

    /// Resolve the type of `code`, defaulting to [`CardType::Unknown`].
    pub fn card_type(&self, code: &str) -> CardType {
        self.types.get(code).copied().unwrap_or_default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.types.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<CardRecord> for MetadataIndex {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        let mut index = MetadataIndex::new();
        index.extend(iter);
        index
    }
}
