use std::sync::Arc;

use crate::utils::{physical_child, template, u, validator, CHILDREN, TEMPLATES};
use anyhow::Result;
use fgo_demand::memory::{InMemoryChain, InMemoryCredits};
use fgo_demand::ChainReadError;
use fgo_types::schema::TEMPLATE_FN;
use fgo_types::{Availability, ChildReferenceInput, ParentDemand};

#[tokio::test]
async fn test_template_short_by_two_still_checks_children() -> Result<()> {
    let chain = Arc::new(
        InMemoryChain::new()
            .with_template(TEMPLATES, u(1), &template(10, &[(5, 2), (6, 1)]))
            .with_child(CHILDREN, u(5), &physical_child(30, 0, 0))
            .with_child(CHILDREN, u(6), &physical_child(11, 0, 0)),
    );
    let validator = validator(chain.clone(), Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::template(TEMPLATES, u(1), u(3))];

    let result = validator.validate_demand_for_template(&refs, u(4), None).await;

    assert!(!result.is_valid);
    assert_eq!(chain.call_count(), 3);
    let required: Vec<_> = result.child_validations.iter().map(|v| v.required).collect();
    assert_eq!(required, vec![u(12), u(24), u(12)]);
    assert_eq!(
        result.errors,
        vec![
            "Insufficient supply for template 1: required 12, available 10",
            "Insufficient supply for child 6 in template 1: required 12, available 11",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_demand_multiplies_through_parent_and_template() -> Result<()> {
    let chain = Arc::new(
        InMemoryChain::new()
            .with_template(TEMPLATES, u(1), &template(1_000, &[(5, 7)]))
            .with_child(CHILDREN, u(5), &physical_child(1_000, 0, 0)),
    );
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::template(TEMPLATES, u(1), u(3))];
    let parent = ParentDemand {
        max_digital_editions: u(5),
        max_physical_editions: u(0),
        availability: Availability::DigitalOnly,
    };

    let result = validator.validate_demand_for_parent(&refs, &parent, None).await;

    // 7 per template unit, 3 template units per parent, 5 parents.
    assert_eq!(result.child_validations[1].required, u(7 * 3 * 5));
    assert!(result.is_valid);
    Ok(())
}

#[tokio::test]
async fn test_parent_mixes_children_and_templates_in_order() -> Result<()> {
    let chain = Arc::new(
        InMemoryChain::new()
            .with_child(CHILDREN, u(1), &physical_child(100, 0, 0))
            .with_template(TEMPLATES, u(2), &template(100, &[(3, 1)]))
            .with_child(CHILDREN, u(3), &physical_child(100, 0, 0))
            .with_child(CHILDREN, u(4), &physical_child(100, 0, 0)),
    );
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [
        ChildReferenceInput::child(CHILDREN, u(1), u(1)),
        ChildReferenceInput::template(TEMPLATES, u(2), u(1)),
        ChildReferenceInput::child(CHILDREN, u(4), u(1)),
    ];
    let parent = ParentDemand {
        max_digital_editions: u(0),
        max_physical_editions: u(2),
        availability: Availability::PhysicalOnly,
    };

    let result = validator.validate_demand_for_parent(&refs, &parent, None).await;

    let ids: Vec<_> = result.child_validations.iter().map(|v| v.child_id).collect();
    assert_eq!(ids, vec![u(1), u(2), u(3), u(4)]);
    assert!(result.child_validations[0].channel.is_some());
    assert!(result.child_validations[1].channel.is_none());
    assert!(result.is_valid);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_template_inside_parent_is_reported() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new().with_failure(
        TEMPLATES,
        TEMPLATE_FN,
        u(9),
        ChainReadError::Malformed("output 10: expected tuple[]".into()),
    ));
    let validator = validator(chain, Arc::new(InMemoryCredits::new()));
    let refs = [ChildReferenceInput::template(TEMPLATES, u(9), u(1))];
    let parent = ParentDemand {
        max_digital_editions: u(1),
        max_physical_editions: u(0),
        availability: Availability::DigitalOnly,
    };

    let result = validator.validate_demand_for_parent(&refs, &parent, None).await;

    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec!["Failed to fetch data for template 9: malformed response: output 10: expected tuple[]"]
    );
    Ok(())
}
