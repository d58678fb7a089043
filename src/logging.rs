//! Log output for the command-line front end.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose { "git_diffstats=debug,warn" } else { "warn" }
}

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects between debug
/// output for this crate and warnings only.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
