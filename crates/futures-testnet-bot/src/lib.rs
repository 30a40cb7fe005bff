/*
[INPUT]:  Public API exports for futures-testnet-bot crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod bot;
pub mod config;
pub mod logging;
pub mod order;
pub mod precheck;
pub mod report;
pub mod web;

// Re-export main types for convenience
pub use bot::TradingBot;
pub use config::{BotConfig, ConfigError};
pub use order::{OrderKind, OrderParams, ValidationError};
pub use precheck::{NotionalCheck, check_notional};
pub use report::OutputFormat;
