use std::{
    future::Future,
    net::SocketAddr,
    time::Duration,
};

use tonic::transport::Server;
use tracing::{
    error,
    info,
};

use crate::{
    handler::RatesHandler,
    proto::rates_service_server::RatesServiceServer,
};



/// Serve `handler` on `addr` until `shutdown` resolves.
///
/// `timeout` bounds each call. If the caller sends a shorter `grpc-timeout`,
/// that one wins. When a call times out or the caller goes away, the handler
/// future is dropped together with its in-flight HTTP and database work.
///
/// On shutdown the listener is closed first and in-flight calls are allowed
/// to finish.
pub async fn serve<F>(addr: SocketAddr, handler: RatesHandler, timeout: Duration,
    shutdown: F
)
    -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()>,
{
    info!(%addr, "gRPC server listening");

    Server::builder()
        .timeout(timeout)
        .add_service(RatesServiceServer::new(handler))
        .serve_with_shutdown(addr, shutdown)
        .await
}



/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{
            signal,
            SignalKind,
        };

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("received SIGTERM, shutting down");
        }
    }
}
