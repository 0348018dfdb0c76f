//! Futures-credit ledger of a single user.

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureCredit {
    pub child_contract: Address,
    #[serde(with = "crate::decimal")]
    pub child_id: U256,
    #[serde(with = "crate::decimal")]
    pub credits: U256,
    #[serde(with = "crate::decimal")]
    pub consumed: U256,
}

impl FutureCredit {
    /// `credits − consumed`, unclamped.
    pub fn available(&self) -> I256 {
        to_signed(self.credits).saturating_sub(to_signed(self.consumed))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredits {
    pub address: Address,
    #[serde(default)]
    pub future_credits: Vec<FutureCredit>,
}

impl UserCredits {
    pub fn is_empty(&self) -> bool {
        self.future_credits.is_empty()
    }

    /// First ledger entry for `(child_contract, child_id)`. Addresses compare
    /// by bytes, so checksum casing on either side is irrelevant.
    pub fn find(&self, child_contract: Address, child_id: U256) -> Option<&FutureCredit> {
        self.future_credits
            .iter()
            .find(|c| c.child_contract == child_contract && c.child_id == child_id)
    }
}

/// Values above `I256::MAX` cannot come from a real ledger; pin them there.
pub(crate) fn to_signed(value: U256) -> I256 {
    I256::try_from(value).unwrap_or(I256::MAX)
}
