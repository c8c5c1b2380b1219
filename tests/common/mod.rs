#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;

pub use assertions::*;
pub use builders::*;

/// Initialise logging once per test binary. `RUST_LOG` overrides the level.
pub fn init_logging() {
    env_logger::try_init_from_env(env_logger::Env::new().default_filter_or("info")).ok();
}
