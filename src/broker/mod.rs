//! Metadata broker over the root and data coordinators
//!
//! - `client`: capability traits, one per coordinator
//! - `grpc`: tonic implementations of those traits
//! - `transform`: payload reshaping independent of the transport
//! - `coordinator`: the broker itself

pub mod client;
pub mod coordinator;
pub mod grpc;
pub mod transform;

pub use client::{DataCoordClient, RootCoordClient};
pub use coordinator::CoordinatorBroker;
pub use grpc::{DataCoordGrpcClient, RootCoordGrpcClient};
