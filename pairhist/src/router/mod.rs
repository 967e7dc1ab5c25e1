pub mod candles;
pub mod identity;

/// Chain assumed when no source named one; the launch platform's chain.
pub(crate) const DEFAULT_CHAIN: &str = "solana";
