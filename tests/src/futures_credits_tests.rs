use std::sync::Arc;

use crate::utils::{child, futures_child, ledger, u, validator, CHILDREN, USER};
use anyhow::Result;
use fgo_demand::memory::{InMemoryChain, InMemoryCredits};
use fgo_demand::CreditsLookupError;
use fgo_types::{Availability, ChildReferenceInput, FuturesCreditsValidationResult, I256};

#[tokio::test]
async fn test_user_without_ledger_passes_without_reads() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &futures_child()));
    let credits = Arc::new(InMemoryCredits::new());
    let validator = validator(chain.clone(), credits.clone());
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(50))];

    let result = validator
        .validate_futures_credits(&refs, u(10), USER, Availability::PhysicalOnly, None)
        .await;

    assert_eq!(result, FuturesCreditsValidationResult::new());
    assert_eq!(credits.lookups(), 1);
    assert_eq!(chain.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_non_futures_children_never_appear() -> Result<()> {
    let chain = Arc::new(
        InMemoryChain::new()
            .with_child(CHILDREN, u(1), &child(Availability::Both))
            .with_child(CHILDREN, u(2), &futures_child())
            .with_child(CHILDREN, u(3), &child(Availability::PhysicalOnly)),
    );
    let credits = Arc::new(InMemoryCredits::new().with_ledger(ledger(&[(2, 100, 0)])));
    let validator = validator(chain.clone(), credits.clone());
    let refs: Vec<_> = (1..=3)
        .map(|id| ChildReferenceInput::child(CHILDREN, u(id), u(1)))
        .collect();

    let result = validator
        .validate_futures_credits(&refs, u(1), USER, Availability::Both, None)
        .await;

    assert!(result.is_valid);
    let ids: Vec<_> = result.credit_checks.iter().map(|c| c.child_id).collect();
    assert_eq!(ids, vec![u(2)]);
    assert_eq!(chain.call_count(), 3);
    assert_eq!(credits.lookups(), 1);
    Ok(())
}

#[tokio::test]
async fn test_physical_shortfall_against_consumed_credits() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &futures_child()));
    let credits = Arc::new(InMemoryCredits::new().with_ledger(ledger(&[(1, 20, 15)])));
    let validator = validator(chain, credits);
    let refs = [ChildReferenceInput::child(CHILDREN, u(1), u(2))];

    let result = validator
        .validate_futures_credits(&refs, u(3), USER, Availability::Both, None)
        .await;

    assert!(!result.is_valid);
    let check = &result.credit_checks[0];
    assert_eq!(check.required.digital, u(6));
    assert_eq!(check.required.physical, u(6));
    assert_eq!(check.available, I256::try_from(5i64).unwrap());
    assert_eq!(
        result.errors,
        vec!["Insufficient futures credits for child 1: required 6, available 5"]
    );
    Ok(())
}

#[tokio::test]
async fn test_credit_match_ignores_address_casing() -> Result<()> {
    // The subgraph stores lowercase addresses; requests may carry upper case.
    let upper: alloy_primitives::Address = format!("0x{}", "C1".repeat(20)).parse()?;
    assert_eq!(upper, CHILDREN);

    let chain = Arc::new(InMemoryChain::new().with_child(CHILDREN, u(1), &futures_child()));
    let credits = Arc::new(InMemoryCredits::new().with_ledger(ledger(&[(1, 5, 0)])));
    let validator = validator(chain, credits);
    let refs = [ChildReferenceInput::child(upper, u(1), u(1))];

    let result = validator
        .validate_futures_credits(&refs, u(5), USER, Availability::PhysicalOnly, None)
        .await;

    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(result.credit_checks.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_lookup_is_a_single_error() -> Result<()> {
    let chain = Arc::new(InMemoryChain::new());
    let credits = Arc::new(InMemoryCredits::failing(CreditsLookupError::Malformed(
        "indexing error".into(),
    )));
    let validator = validator(chain.clone(), credits);
    let refs = [
        ChildReferenceInput::child(CHILDREN, u(1), u(1)),
        ChildReferenceInput::child(CHILDREN, u(2), u(1)),
    ];

    let result = validator
        .validate_futures_credits(&refs, u(1), USER, Availability::Both, None)
        .await;

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("malformed credits response: indexing error"));
    assert_eq!(chain.call_count(), 0);
    Ok(())
}
