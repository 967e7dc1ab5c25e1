//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `normalize`: provider timestamps to instants and calendar dates
//! - `reconcile`: collapse raw candles into one canonical candle per date
//! - `format`: render provider prices as fixed-point strings
//! - `merge`: combine reconciled series in priority order
/// Price formatting.
pub mod format;
/// Priority merge of reconciled series.
pub mod merge;
/// Timestamp normalisation helpers.
pub mod normalize;
/// Per-date reconciliation of raw candles.
pub mod reconcile;
