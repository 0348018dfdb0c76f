use std::sync::Arc;

use alloy_primitives::U256;
use fgo_types::{Dictionary, MessageKey};

use crate::client::{ContractReader, CreditsLookup};
use crate::supply::SupplyReader;

/// Validation engine. Stateless between calls; cheap to clone and share
/// across request handlers.
#[derive(Clone)]
pub struct DemandValidator {
    reader: Arc<dyn ContractReader>,
    credits: Arc<dyn CreditsLookup>,
}

impl DemandValidator {
    pub fn new(reader: Arc<dyn ContractReader>, credits: Arc<dyn CreditsLookup>) -> Self {
        Self { reader, credits }
    }

    pub fn supply(&self) -> SupplyReader<'_> {
        SupplyReader::new(self.reader.as_ref())
    }

    pub(crate) fn credits(&self) -> &dyn CreditsLookup {
        self.credits.as_ref()
    }
}

/// Caller's dictionary, or English.
pub(crate) fn dictionary_or_english(dict: Option<&Dictionary>) -> std::borrow::Cow<'_, Dictionary> {
    match dict {
        Some(d) => std::borrow::Cow::Borrowed(d),
        None => std::borrow::Cow::Owned(Dictionary::english()),
    }
}

/// Error for a demand whose `amount × editions` does not fit in a `uint256`.
pub(crate) fn overflow_error(dict: &Dictionary, id: &U256, amount: &U256, editions: &U256) -> String {
    dict.format(
        MessageKey::DemandOverflow,
        &[("childId", id), ("amount", amount), ("editions", editions)],
    )
}
