use std::{
    env,
    io::{self, IsTerminal},
    sync::Once,
};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` wins over `--debug` when set.
pub fn init_logging(debug: bool) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if debug {
            EnvFilter::new("envcheck=debug")
        } else {
            EnvFilter::new("envcheck=warn")
        };

        // Another subscriber may already be installed when used as a library.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(io::stderr().is_terminal())
                    .with_writer(io::stderr),
            )
            .try_init();
    });
}
