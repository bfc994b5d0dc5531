//! # metabroker
//!
//! Metadata broker between a query node and the two coordinator services:
//! - Root coordinator: collection schemas and partitions
//! - Data coordinator: recovery info, segments and indexes
//!
//! Every lookup goes through [`CoordinatorBroker`], which validates the
//! response envelope, maps failure codes onto typed [`Error`]s and flattens
//! nested payloads.
//!
//! ## Architecture
//!
//! ```text
//!            ┌──────────────────────────┐
//!  caller ──▶│    CoordinatorBroker     │
//!            │  status check / reshape  │
//!            └──────┬────────────┬──────┘
//!                   │ gRPC       │ gRPC
//!          ┌────────▼───┐   ┌────▼─────────┐
//!          │ RootCoord  │   │  DataCoord   │
//!          │ schema,    │   │ recovery,    │
//!          │ partitions │   │ segments,    │
//!          └────────────┘   │ indexes      │
//!                           └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! metabroker --root-coord http://localhost:53100 schema --collection 100
//! metabroker --data-coord http://localhost:13333 index-info --collection 100 --segment 10000
//! metabroker --config ./metabroker.toml serve
//! ```

pub mod broker;
pub mod common;
pub mod http;
pub mod proto;

// Re-export commonly used types
pub use broker::CoordinatorBroker;
pub use common::{BrokerConfig, CallContext, Error, Result};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
