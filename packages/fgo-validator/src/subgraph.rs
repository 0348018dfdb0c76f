//! Futures-credit lookups against the FGO subgraph.
//!
//! Users are keyed by lowercase hex address. A user entity that does not
//! exist comes back as `null`, which maps to `Ok(None)`.

use std::sync::atomic::Ordering;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use fgo_demand::{lowercase_hex, CreditsLookup, CreditsLookupError};
use fgo_types::{FutureCredit, UserCredits};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::metrics::METRICS;

const USER_CREDITS_QUERY: &str = "\
query UserFuturesCredits($user: ID!) {
  user(id: $user) {
    futureCredits {
      child { childContract childId }
      credits
      consumed
    }
  }
}";

pub struct SubgraphClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    #[serde(default)]
    data: Option<UserData>,
    #[serde(default)]
    errors: Vec<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    future_credits: Vec<RawCredit>,
}

#[derive(Debug, Deserialize)]
struct RawCredit {
    child: RawChild,
    #[serde(with = "fgo_types::decimal")]
    credits: U256,
    #[serde(with = "fgo_types::decimal")]
    consumed: U256,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChild {
    child_contract: Address,
    #[serde(with = "fgo_types::decimal")]
    child_id: U256,
}

impl SubgraphClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, crate::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::Error::Subgraph(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http, url: url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self, user: Address) -> Result<Option<UserCredits>, CreditsLookupError> {
        let user_key = lowercase_hex(user);
        debug!(subgraph = %self.url, user = %user_key, "Fetching futures credits");
        let body = json!({ "query": USER_CREDITS_QUERY, "variables": { "user": user_key } });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CreditsLookupError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CreditsLookupError::Transport(format!("HTTP {status}")));
        }
        let parsed: GraphResponse = response
            .json()
            .await
            .map_err(|e| CreditsLookupError::Malformed(e.to_string()))?;
        into_user_credits(user, parsed)
    }
}

#[async_trait]
impl CreditsLookup for SubgraphClient {
    async fn user_credits(
        &self,
        user: Address,
    ) -> Result<Option<UserCredits>, CreditsLookupError> {
        let result = self.fetch(user).await;
        if let Err(e) = &result {
            METRICS.subgraph_errors.fetch_add(1, Ordering::Relaxed);
            warn!(subgraph = %self.url, error = %e, "Futures credits lookup failed");
        }
        result
    }
}

fn into_user_credits(
    user: Address,
    response: GraphResponse,
) -> Result<Option<UserCredits>, CreditsLookupError> {
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(CreditsLookupError::Malformed(messages.join("; ")));
    }
    let data = response
        .data
        .ok_or_else(|| CreditsLookupError::Malformed("response has no data".into()))?;
    Ok(data.user.map(|raw| UserCredits {
        address: user,
        future_credits: raw
            .future_credits
            .into_iter()
            .map(|c| FutureCredit {
                child_contract: c.child.child_contract,
                child_id: c.child.child_id,
                credits: c.credits,
                consumed: c.consumed,
            })
            .collect(),
    }))
}
