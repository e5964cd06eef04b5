//! CLI command implementations.

mod ask;
mod chunks;
mod config;
mod serve;

pub use ask::run_ask;
pub use chunks::run_chunks;
pub use config::run_config;
pub use serve::run_serve;
