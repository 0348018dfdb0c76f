use alloy_primitives::{Address, U256};
use fgo_types::{
    Availability, ChildReferenceInput, CreditCheck, Dictionary, FuturesCreditsValidationResult,
    MessageKey, RequiredCredits,
};
use tracing::{debug, info, warn};

use crate::validator::{dictionary_or_english, overflow_error, DemandValidator};

impl DemandValidator {
    /// Check that `user` holds enough futures credit for every futures-enabled
    /// child in `references`.
    ///
    /// The ledger is fetched once. A user without ledger entries passes
    /// immediately without any contract reads. Only the physical requirement
    /// is compared against the balance; the digital requirement is recorded
    /// in the credit check but never enforced.
    pub async fn validate_futures_credits(
        &self,
        references: &[ChildReferenceInput],
        editions: U256,
        user: Address,
        availability: Availability,
        dict: Option<&Dictionary>,
    ) -> FuturesCreditsValidationResult {
        let dict = dictionary_or_english(dict);
        let mut result = FuturesCreditsValidationResult::new();

        let ledger = match self.credits().user_credits(user).await {
            Ok(Some(ledger)) if !ledger.is_empty() => ledger,
            Ok(_) => {
                debug!(%user, "No futures credits on record, nothing to check");
                return result;
            }
            Err(e) => {
                warn!(%user, error = %e, "Futures credits lookup failed");
                result.fail(dict.format(
                    MessageKey::CreditsFetchFailed,
                    &[("user", &lowercase_hex(user)), ("error", &e)],
                ));
                return result;
            }
        };

        let supply = self.supply();
        for reference in references {
            let is_futures = match supply
                .read_futures_flag(reference.child_contract, reference.child_id)
                .await
            {
                Ok(flag) => flag,
                Err(e) => {
                    warn!(
                        child_contract = %reference.child_contract,
                        child_id = %reference.child_id,
                        error = %e,
                        "Futures flag read failed"
                    );
                    result.fail(dict.format(
                        MessageKey::ChildFetchFailed,
                        &[("childId", &reference.child_id), ("error", &e)],
                    ));
                    continue;
                }
            };
            if !is_futures {
                debug!(child_id = %reference.child_id, "Not a futures child, skipping");
                continue;
            }

            let Some(credit) = ledger.find(reference.child_contract, reference.child_id) else {
                result.fail(dict.format(
                    MessageKey::NoFuturesCredits,
                    &[("childId", &reference.child_id)],
                ));
                continue;
            };

            let Some(total) = reference.required_for(editions) else {
                warn!(child_id = %reference.child_id, "Required amount overflows");
                result.fail(overflow_error(&dict, &reference.child_id, &reference.amount, &editions));
                continue;
            };
            let available = credit.available();
            let required = RequiredCredits::split(total, availability);
            result.record(CreditCheck {
                child_contract: reference.child_contract,
                child_id: reference.child_id,
                required,
                available,
            });
            if required.physical_exceeds(available) {
                result.fail(dict.format(
                    MessageKey::InsufficientFuturesCredits,
                    &[
                        ("childId", &reference.child_id),
                        ("required", &required.physical),
                        ("available", &available),
                    ],
                ));
            }
        }

        info!(
            %user,
            references = references.len(),
            checks = result.credit_checks.len(),
            errors = result.errors.len(),
            valid = result.is_valid,
            "Futures credits validated"
        );
        result
    }
}

/// Lowercase `0x…` form, the shape the credits index keys users by.
pub fn lowercase_hex(address: Address) -> String {
    format!("{address:#x}")
}
