use std::sync::Arc;

use crate::utils::{
    digital_child, futures_child, ledger, physical_child, return_data, template, u, EncodedChain,
    CHILDREN, TEMPLATES, USER,
};
use anyhow::Result;
use fgo_demand::memory::{child_metadata_value, template_value, InMemoryChain, InMemoryCredits};
use fgo_demand::{decode_child_metadata, decode_template, DemandValidator};
use fgo_types::abi::{self, AbiValue};
use fgo_types::schema::{CHILD_METADATA_FN, TEMPLATE_FN};
use fgo_types::{Availability, ChildReferenceInput, ChildSupplySnapshot, ParentDemand};

#[test]
fn test_child_metadata_survives_encoding() -> Result<()> {
    let snapshot = ChildSupplySnapshot {
        max_physical_editions: u(500),
        current_physical_editions: u(120),
        current_digital_editions: u(33),
        max_digital_editions: u(1_000),
        total_reserved_supply: u(40),
        availability: Availability::Both,
        is_futures: true,
    };
    let data = return_data(&CHILD_METADATA_FN, child_metadata_value(&snapshot));
    // Offset word, 12 head words + 4 futures words, then the empty uri.
    assert_eq!(data.len(), 32 * (1 + 12 + 4 + 1));

    let decoded = abi::decode_output(&CHILD_METADATA_FN, &data)?;
    assert_eq!(decode_child_metadata(&decoded)?, snapshot);
    Ok(())
}

#[test]
fn test_template_positions_survive_encoding() -> Result<()> {
    let snapshot = template(250, &[(5, 2), (6, 3)]);
    let data = return_data(&TEMPLATE_FN, template_value(&snapshot));

    let decoded = abi::decode_output(&TEMPLATE_FN, &data)?;
    assert!(matches!(decoded.get(10), Some(AbiValue::Array(refs)) if refs.len() == 2));
    assert_eq!(decode_template(&decoded)?, snapshot);
    Ok(())
}

#[test]
fn test_truncated_return_data_is_rejected() {
    let data = return_data(&CHILD_METADATA_FN, child_metadata_value(&futures_child()));
    assert!(abi::decode_output(&CHILD_METADATA_FN, &data[..data.len() - 40]).is_err());
}

#[tokio::test]
async fn test_parent_validation_over_encoded_reads() -> Result<()> {
    let chain = Arc::new(EncodedChain::new(
        InMemoryChain::new()
            .with_child(CHILDREN, u(1), &digital_child(25, 5))
            .with_template(TEMPLATES, u(2), &template(100, &[(3, 4)]))
            .with_child(CHILDREN, u(3), &physical_child(50, 0, 10)),
    ));
    let validator = DemandValidator::new(chain.clone(), Arc::new(InMemoryCredits::new()));
    let refs = [
        ChildReferenceInput::child(CHILDREN, u(1), u(2)),
        ChildReferenceInput::template(TEMPLATES, u(2), u(1)),
    ];
    let parent = ParentDemand {
        max_digital_editions: u(10),
        max_physical_editions: u(0),
        availability: Availability::DigitalOnly,
    };

    let result = validator.validate_demand_for_parent(&refs, &parent, None).await;

    assert!(result.is_valid, "{:?}", result.errors);
    let required: Vec<_> = result.child_validations.iter().map(|v| v.required).collect();
    assert_eq!(required, vec![u(20), u(10), u(40)]);
    assert_eq!(result.child_validations[2].available, u(40));
    assert_eq!(chain.calls().len(), 3);
    assert!(chain.bytes_served() > 0);
    Ok(())
}

#[tokio::test]
async fn test_futures_flag_read_over_encoded_reads() -> Result<()> {
    let chain = Arc::new(EncodedChain::new(
        InMemoryChain::new()
            .with_child(CHILDREN, u(1), &futures_child())
            .with_child(CHILDREN, u(2), &digital_child(10, 0)),
    ));
    let credits = Arc::new(InMemoryCredits::new().with_ledger(ledger(&[(1, 1, 0)])));
    let validator = DemandValidator::new(chain, credits);
    let refs = [
        ChildReferenceInput::child(CHILDREN, u(1), u(1)),
        ChildReferenceInput::child(CHILDREN, u(2), u(1)),
    ];

    let result = validator
        .validate_futures_credits(&refs, u(2), USER, Availability::PhysicalOnly, None)
        .await;

    assert_eq!(result.credit_checks.len(), 1);
    assert_eq!(
        result.errors,
        vec!["Insufficient futures credits for child 1: required 2, available 1"]
    );
    Ok(())
}
