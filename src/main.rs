use std::sync::Arc;

use clap::Parser;
use tracing::{
    debug,
    error,
    info,
};

use rate_service::{
    BoxError,
    adapter::GrinexDepthProvider,
    config::{
        Config,
        StorageKind,
    },
    grinex,
    handler::RatesHandler,
    logger,
    server,
    service::RatesService,
    storage::{
        RatesRepository,
        postgres::Postgres,
        stdout::Stdout,
    },
};



#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // .env is optional, real deployments pass plain environment variables.
    let dotenv_result = dotenv::dotenv();

    let config = Config::parse();
    logger::init(config.log_level)?;

    if let Err(e) = dotenv_result {
        debug!(error = %e, ".env not loaded");
    }

    info!(
        grpc_address = %config.grpc_address,
        grinex_address = %config.grinex_address,
        log_level = config.log_level.as_str(),
        storage = ?config.storage,
        request_timeout_ms = config.request_timeout_ms,
        save_timeout_ms = config.save_timeout_ms,
        "config loaded"
    );

    let client = grinex::Client::new(&config.grinex_address, config.request_timeout())
        .inspect_err(|e| error!(error = %e, "failed to create grinex client"))?;
    let depth_provider = Arc::new(GrinexDepthProvider::new(client));

    // Storage implementation is chosen by configuration.
    let rates_repository: Arc<dyn RatesRepository> = match config.storage {
        StorageKind::Postgres => {
            let storage = Postgres::new(&config.database_address, config.save_timeout());
            storage.migrate().await
                .inspect_err(|e| error!(error = %e, "failed to prepare postgres"))?;
            info!("postgres storage ready");

            Arc::new(storage)
        }
        StorageKind::Stdout => Arc::new(Stdout),
    };

    let rates_service = Arc::new(RatesService::new(depth_provider, rates_repository,
        config.save_timeout()
    ));
    let handler = RatesHandler::new(rates_service);

    server::serve(config.grpc_address, handler, config.request_timeout(),
        server::shutdown_signal()
    )
        .await
        .inspect_err(|e| error!(error = %e, "gRPC server failed"))?;

    info!("shutdown complete");

    Ok(())
}
