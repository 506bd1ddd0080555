//! Logger setup for simulation binaries

use env_logger::Env;

/// Install the `env_logger` backend with an `info` default filter.
///
/// `RUST_LOG` overrides the filter. Calling this more than once is harmless,
/// later calls leave the first logger in place.
pub fn init() {
    let installed = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logger initialised");
    }
}
