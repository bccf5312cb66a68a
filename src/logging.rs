use tracing_subscriber::EnvFilter;

pub const ENV_VAR: &str = "GITLI_LOG";

/// Install the stderr subscriber. `GITLI_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let default = if verbose { "gitli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
