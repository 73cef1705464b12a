#![doc(test(attr(deny(warnings))))]

//! Bill Core keeps monthly bill files (`YYYYMM.md` markdown tables) and
//! drives the `bill_core_cli` shell on top of the `billy-*` crates.

pub mod cli;
pub mod errors;
pub mod tools;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bill Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
