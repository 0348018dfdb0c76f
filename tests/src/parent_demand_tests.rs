use std::sync::Arc;

use crate::utils::{child, digital_child, physical_child, u, validator, CHILDREN};
use anyhow::Result;
use fgo_demand::memory::{InMemoryChain, InMemoryCredits};
use fgo_demand::ChainReadError;
use fgo_types::schema::CHILD_METADATA_FN;
use fgo_types::{Availability, ChildReferenceInput, ParentDemand};

fn digital_parent(editions: u64) -> ParentDemand {
    ParentDemand {
        max_digital_editions: u(editions),
        max_physical_editions: u(0),
        availability: Availability::DigitalOnly,
    }
}

#[tokio::test]
async fn test_digital_boundary_passes_at_exact_availability() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &digital_child(25, 5)));
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(2))];

    let result = validator
        .validate_demand_for_parent(&refs, &digital_parent(10), None)
        .await;

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.child_validations[0].required, u(20));
    assert_eq!(result.child_validations[0].available, u(20));
    Ok(())
}

#[tokio::test]
async fn test_digital_boundary_fails_one_below() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &digital_child(25, 6)));
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(2))];

    let result = validator
        .validate_demand_for_parent(&refs, &digital_parent(10), None)
        .await;

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert!(error.contains("child 1"), "{error}");
    assert!(error.contains("required 20"), "{error}");
    assert!(error.contains("available 19"), "{error}");
    Ok(())
}

#[tokio::test]
async fn test_overshot_counters_clamp_to_zero() -> Result<()> {
    let overshot = fgo_types::ChildSupplySnapshot {
        max_digital_editions: u(5),
        current_digital_editions: u(9),
        max_physical_editions: u(5),
        current_physical_editions: u(4),
        total_reserved_supply: u(3),
        ..child(Availability::Both)
    };
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &overshot));
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(1))];
    let parent = ParentDemand {
        max_digital_editions: u(1),
        max_physical_editions: u(1),
        availability: Availability::Both,
    };

    let result = validator.validate_demand_for_parent(&refs, &parent, None).await;

    assert_eq!(result.child_validations.len(), 2);
    assert!(result.child_validations.iter().all(|v| v.available == u(0)));
    assert_eq!(result.errors.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_middle_failure_does_not_short_circuit() -> Result<()> {
    let chain = Arc::new(
        InMemoryChain::new()
            .with_child(CHILDREN, u(1), &digital_child(100, 0))
            .with_failure(
                CHILDREN,
                CHILD_METADATA_FN,
                u(2),
                ChainReadError::Transport("timeout".into()),
            )
            .with_child(CHILDREN, u(3), &digital_child(100, 0)),
    );
    let validator = validator(chain.clone(), Arc::new(InMemoryCredits::new()));
    let refs: Vec<_> = (1..=3)
        .map(|id| ChildReferenceInput::child(CHILDREN, u(id), u(1)))
        .collect();

    let result = validator
        .validate_demand_for_parent(&refs, &digital_parent(10), None)
        .await;

    assert!(!result.is_valid);
    assert_eq!(chain.call_count(), 3);
    let read_ids: Vec<_> = chain.calls().iter().filter_map(|c| c.id_arg()).collect();
    assert_eq!(read_ids, vec![u(1), u(2), u(3)]);
    assert_eq!(
        result.errors,
        vec!["Failed to fetch data for child 2: network error: timeout"]
    );
    assert_eq!(result.child_validations.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_physical_only_child_under_digital_parent_fails() -> Result<()> {
    let plenty = fgo_types::ChildSupplySnapshot {
        max_digital_editions: u(1_000_000),
        max_physical_editions: u(1_000_000),
        ..child(Availability::PhysicalOnly)
    };
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &plenty));
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(1))];

    let result = validator
        .validate_demand_for_parent(&refs, &digital_parent(1), None)
        .await;

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Child 1 does not support digital editions"]);
    Ok(())
}

#[tokio::test]
async fn test_physical_reservations_hold_back_supply() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &physical_child(10, 4, 3)));
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(1))];
    let parent = ParentDemand {
        max_digital_editions: u(0),
        max_physical_editions: u(4),
        availability: Availability::PhysicalOnly,
    };

    let result = validator.validate_demand_for_parent(&refs, &parent, None).await;

    assert_eq!(result.child_validations[0].available, u(3));
    assert_eq!(
        result.errors,
        vec!["Insufficient physical supply for child 1: required 4, available 3"]
    );
    Ok(())
}

#[tokio::test]
async fn test_identical_inputs_give_identical_output() -> Result<()> {
    let chain = Arc::new(
        InMemoryChain::new()
            .with_child(CHILDREN, u(1), &digital_child(10, 9))
            .with_child(CHILDREN, u(2), &physical_child(10, 0, 0)),
    );
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [
        ChildReferenceInput::child(CHILDREN, u(1), u(3)),
        ChildReferenceInput::child(CHILDREN, u(2), u(3)),
    ];
    let parent = ParentDemand {
        max_digital_editions: u(2),
        max_physical_editions: u(5),
        availability: Availability::Both,
    };

    let first = validator.validate_demand_for_parent(&refs, &parent, None).await;
    let second = validator.validate_demand_for_parent(&refs, &parent, None).await;

    assert_eq!(first.errors, second.errors);
    assert_eq!(first.child_validations, second.child_validations);
    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
    Ok(())
}
