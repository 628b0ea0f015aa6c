//! Structured logging setup
//!
//! Log output goes through `tracing`. The filter comes from `RUST_LOG` when
//! it is set and falls back to the directives the binary passes in.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
///
/// ```rust
/// substation_web::logging::init("substations=info,substation_web=info");
/// tracing::info!("ready");
/// ```
pub fn init(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
