use tracing::metadata::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

pub mod environment;
pub mod pages;
pub mod redirect;
pub mod router;

pub fn initialize() -> color_eyre::Result<()> {
    // Setup error reporting
    color_eyre::install()?;

    // Setup logging
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(LevelFilter::INFO.into())
                .add_directive("tower_http=debug".parse()?)
                .add_directive(format!("{}=trace", env!("CARGO_CRATE_NAME")).parse()?),
        )
        .finish()
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
