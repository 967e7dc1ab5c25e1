//! pairhist-mock
//!
//! Scriptable connectors and an in-memory sink, so the resolver, the candle
//! fetcher and the pipeline driver can be exercised without a network.
#![warn(missing_docs)]

mod connector;
pub mod fixtures;
mod sink;

pub use connector::{Call, MockConnector, MockConnectorBuilder};
pub use sink::MemorySink;
