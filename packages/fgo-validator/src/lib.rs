//! # FGO Validator
//!
//! HTTP front end for the FGO demand validator. Reads child and template
//! supply over EVM JSON-RPC and futures credits from the FGO subgraph.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin fgo-validator
//! ```
//!
//! ## Endpoints
//! - `GET /health` - Health check with RPC status
//! - `GET /metrics` - Prometheus counters
//! - `POST /validate/parent` - Parent bill of materials against supply
//! - `POST /validate/template` - Template references against supply
//! - `POST /validate/futures` - Futures credits of a user

pub mod config;
mod error;
mod handlers;
pub mod metrics;
mod response;
mod router;
pub mod rpc;
pub mod schemas;
mod state;
pub mod subgraph;

pub use crate::config::Config;
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
