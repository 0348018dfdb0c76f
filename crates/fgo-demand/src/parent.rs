use fgo_types::{
    ChildReferenceInput, ChildSupplySnapshot, ChildValidation, Dictionary, MessageKey,
    ParentDemand, ValidationResult,
};
use tracing::{debug, info, warn};

use crate::validator::{dictionary_or_english, overflow_error, DemandValidator};

impl DemandValidator {
    /// Check every reference of a parent against current on-chain supply.
    ///
    /// Leaf children are checked per channel the parent mints on. Template
    /// references are handed to [`Self::validate_demand_for_template`] with
    /// the parent's digital editions as multiplier, or its physical editions
    /// when digital is zero. A parent minting both channels with different
    /// counts therefore checks its templates against the digital count only.
    pub async fn validate_demand_for_parent(
        &self,
        references: &[ChildReferenceInput],
        parent: &ParentDemand,
        dict: Option<&Dictionary>,
    ) -> ValidationResult {
        let dict = dictionary_or_english(dict);
        let supply = self.supply();
        let mut result = ValidationResult::new();

        for reference in references {
            if reference.is_template {
                let nested = self
                    .validate_demand_for_template(
                        std::slice::from_ref(reference),
                        parent.template_multiplier(),
                        Some(&*dict),
                    )
                    .await;
                result.merge(nested);
                continue;
            }

            match supply
                .read_child_supply(reference.child_contract, reference.child_id)
                .await
            {
                Ok(snapshot) => check_channels(&mut result, reference, &snapshot, parent, &dict),
                Err(e) => {
                    warn!(
                        child_contract = %reference.child_contract,
                        child_id = %reference.child_id,
                        error = %e,
                        "Child supply read failed"
                    );
                    result.fail(dict.format(
                        MessageKey::ChildFetchFailed,
                        &[("childId", &reference.child_id), ("error", &e)],
                    ));
                }
            }
        }

        info!(
            references = references.len(),
            checks = result.child_validations.len(),
            errors = result.errors.len(),
            valid = result.is_valid,
            "Parent demand validated"
        );
        result
    }
}

fn check_channels(
    result: &mut ValidationResult,
    reference: &ChildReferenceInput,
    snapshot: &ChildSupplySnapshot,
    parent: &ParentDemand,
    dict: &Dictionary,
) {
    for channel in parent.availability.channels() {
        let editions = parent.editions(channel);
        let Some(required) = reference.required_for(editions) else {
            warn!(child_id = %reference.child_id, channel = %channel, "Required amount overflows");
            result.fail(overflow_error(dict, &reference.child_id, &reference.amount, &editions));
            continue;
        };
        if required.is_zero() {
            continue;
        }
        let available = snapshot.available(channel);
        debug!(
            child_id = %reference.child_id,
            channel = %channel,
            %required,
            %available,
            "Checking child supply"
        );

        result.record(ChildValidation {
            child_contract: reference.child_contract,
            child_id: reference.child_id,
            required,
            available,
            max_editions: snapshot.max_editions(channel),
            current_editions: snapshot.current_editions(channel),
            reserved_supply: snapshot.reserved_supply(channel),
            channel: Some(channel),
        });

        let channel_name = dict.channel_name(channel);
        if !snapshot.supports(channel) {
            result.fail(dict.format(
                MessageKey::ChannelUnsupported,
                &[("childId", &reference.child_id), ("channel", &channel_name)],
            ));
        } else if required > available {
            result.fail(dict.format(
                MessageKey::InsufficientChannelSupply,
                &[
                    ("childId", &reference.child_id),
                    ("channel", &channel_name),
                    ("required", &required),
                    ("available", &available),
                ],
            ));
        }
    }
}
