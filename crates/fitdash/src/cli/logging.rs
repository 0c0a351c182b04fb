use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_LOG_DIRECTIVES: &str = "warn";
const VERBOSE_LOG_DIRECTIVES: &str = "warn,fitdashapp=debug,fitdash=debug";

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    LOGGER_INIT.get_or_init(|| {
        let fallback = if verbose {
            VERBOSE_LOG_DIRECTIVES
        } else {
            DEFAULT_LOG_DIRECTIVES
        };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        // try_init: a subscriber installed by a test harness is not an error
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose)
                    .without_time(),
            )
            .try_init();
    });
}
