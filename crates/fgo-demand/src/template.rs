use alloy_primitives::U256;
use fgo_types::{ChildReferenceInput, ChildValidation, Dictionary, MessageKey, ValidationResult};
use tracing::{debug, info, warn};

use crate::error::ChainReadError;
use crate::validator::{dictionary_or_english, overflow_error, DemandValidator};

/// Which read in a template walk failed.
enum Unreadable {
    Template(ChainReadError),
    Child(U256, ChainReadError),
}

impl DemandValidator {
    /// Check template references against their own supply, then cascade the
    /// demand into each template's child references.
    ///
    /// Every reference is treated as a template. Nested children are always
    /// leaves and are checked on combined (channel-less) supply. A read failure
    /// abandons the rest of that template and moves on to the next reference.
    pub async fn validate_demand_for_template(
        &self,
        references: &[ChildReferenceInput],
        template_editions: U256,
        dict: Option<&Dictionary>,
    ) -> ValidationResult {
        let dict = dictionary_or_english(dict);
        let mut result = ValidationResult::new();

        for reference in references {
            match self.check_template(&mut result, reference, template_editions, &dict).await {
                Ok(()) => {}
                Err(Unreadable::Template(e)) => {
                    warn!(
                        template_contract = %reference.child_contract,
                        template_id = %reference.child_id,
                        error = %e,
                        "Template supply read failed"
                    );
                    result.fail(dict.format(
                        MessageKey::TemplateFetchFailed,
                        &[("templateId", &reference.child_id), ("error", &e)],
                    ));
                }
                Err(Unreadable::Child(child_id, e)) => {
                    warn!(
                        template_id = %reference.child_id,
                        %child_id,
                        error = %e,
                        "Nested child supply read failed"
                    );
                    result.fail(dict.format(
                        MessageKey::ChildFetchFailed,
                        &[("childId", &child_id), ("error", &e)],
                    ));
                }
            }
        }

        info!(
            references = references.len(),
            %template_editions,
            checks = result.child_validations.len(),
            errors = result.errors.len(),
            valid = result.is_valid,
            "Template demand validated"
        );
        result
    }

    async fn check_template(
        &self,
        result: &mut ValidationResult,
        reference: &ChildReferenceInput,
        template_editions: U256,
        dict: &Dictionary,
    ) -> Result<(), Unreadable> {
        let supply = self.supply();
        let template = supply
            .read_template_supply(reference.child_contract, reference.child_id)
            .await
            .map_err(Unreadable::Template)?;

        let Some(total_required) = reference.required_for(template_editions) else {
            warn!(template_id = %reference.child_id, "Required amount overflows");
            result.fail(overflow_error(
                dict,
                &reference.child_id,
                &reference.amount,
                &template_editions,
            ));
            return Ok(());
        };
        let available = template.available();
        debug!(
            template_id = %reference.child_id,
            required = %total_required,
            %available,
            nested = template.child_references.len(),
            "Checking template supply"
        );

        result.record(ChildValidation {
            child_contract: reference.child_contract,
            child_id: reference.child_id,
            required: total_required,
            available,
            max_editions: template.max_physical_editions,
            current_editions: template.current_editions(),
            reserved_supply: template.total_reserved_supply,
            channel: None,
        });
        if total_required > available {
            result.fail(dict.format(
                MessageKey::InsufficientTemplateSupply,
                &[
                    ("templateId", &reference.child_id),
                    ("required", &total_required),
                    ("available", &available),
                ],
            ));
        }

        for nested in &template.child_references {
            let Some(nested_required) = nested.amount.checked_mul(total_required) else {
                warn!(
                    template_id = %reference.child_id,
                    child_id = %nested.child_id,
                    "Required amount overflows"
                );
                result.fail(overflow_error(dict, &nested.child_id, &nested.amount, &total_required));
                continue;
            };
            let child = supply
                .read_child_supply(nested.child_contract, nested.child_id)
                .await
                .map_err(|e| Unreadable::Child(nested.child_id, e))?;
            let available = child.combined_available();

            result.record(ChildValidation {
                child_contract: nested.child_contract,
                child_id: nested.child_id,
                required: nested_required,
                available,
                max_editions: child.max_physical_editions,
                current_editions: child.combined_current(),
                reserved_supply: child.total_reserved_supply,
                channel: None,
            });
            if nested_required > available {
                result.fail(dict.format(
                    MessageKey::InsufficientNestedSupply,
                    &[
                        ("childId", &nested.child_id),
                        ("templateId", &reference.child_id),
                        ("required", &nested_required),
                        ("available", &available),
                    ],
                ));
            }
        }
        Ok(())
    }
}
