//! Infrastructure: ports and the adapters behind them.

pub mod catalog;
pub mod clock;
pub mod ports;
pub mod progress_repo;
pub mod settings;
