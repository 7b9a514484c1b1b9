//! Serve command

use crate::app::ServeArgs;
use crate::server;
use anyhow::Result;
use stringly_core::{Config, Store};

pub async fn run(args: ServeArgs, mut config: Config, store: Store) -> Result<()> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.https {
        config.https = true;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    tracing::info!("Environment: {}", config.mode);
    tracing::info!("Port: {}", config.port);
    tracing::info!("Use HTTPS: {}", config.https_enabled());
    tracing::info!("Data directory: {}", store.dir().display());

    server::serve(&config, store).await
}
