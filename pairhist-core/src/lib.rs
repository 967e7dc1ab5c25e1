//! pairhist-core
//!
//! Core traits and utilities shared across the pairhist crates.
//!
//! - `connector`: the `PairhistConnector` trait and its role traits.
//! - `transport`: the transport and user-agent collaborators and the
//!   `ProviderClient` that turns their output into JSON or a typed failure.
//! - `sink`: the output sink contract.
//! - `timeseries`: timestamp normalisation, per-day reconciliation, price
//!   formatting and priority merging.
#![warn(missing_docs)]

/// Connector role traits and the primary `PairhistConnector` interface.
pub mod connector;
/// Output sink contract.
pub mod sink;
/// Time-series utilities for reconciling candles.
pub mod timeseries;
/// Transport collaborators and the shared provider client.
pub mod transport;
pub mod types;

pub use connector::PairhistConnector;
pub use sink::OutputSink;
pub use timeseries::format::format_price;
pub use timeseries::merge::merge_by_priority;
pub use timeseries::normalize::{calendar_date, infer_epoch, to_utc};
pub use timeseries::reconcile::reconcile;
pub use transport::{HttpResponse, ProviderClient, Transport, TransportError, UserAgentSource};
pub use types::*;
