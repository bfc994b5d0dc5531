//! Common types shared across metabroker

pub mod config;
pub mod context;
pub mod error;
pub mod status;

pub use config::BrokerConfig;
pub use context::{CallContext, CancelHandle};
pub use error::{Authority, EntityKind, Error, Result};
pub use status::{check_response, check_status, classify, StatusKind};
