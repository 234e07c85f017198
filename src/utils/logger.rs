use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_cli_logger(verbose: bool) {
    let directive = if verbose {
        "skillnest_upload=debug,info"
    } else {
        "skillnest_upload=info"
    };

    tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

/// JSON lines for CloudWatch.
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter("skillnest_upload=info"))
        .with(tracing_subscriber::fmt::layer().with_target(false).json())
        .init();
}
