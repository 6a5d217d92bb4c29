pub mod routes;

use crate::core::processor::ReceiptProcessor;
use crate::domain::ports::{IdGenerator, ReceiptStore};
use crate::utils::error::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use routes::{router, ErrorResponse, PointsResponse, ProcessResponse};

/// 在指定位址啟動 HTTP 服務，直到 `shutdown` 完成
pub async fn serve<S, G, F>(
    processor: Arc<ReceiptProcessor<S, G>>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<()>
where
    S: ReceiptStore + 'static,
    G: IdGenerator + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    serve_on(processor, listener, shutdown).await
}

/// 使用已綁定的 listener，方便測試以 port 0 啟動
pub async fn serve_on<S, G, F>(
    processor: Arc<ReceiptProcessor<S, G>>,
    listener: TcpListener,
    shutdown: F,
) -> Result<()>
where
    S: ReceiptStore + 'static,
    G: IdGenerator + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "🚀 Receipt points server listening");

    axum::serve(listener, router(processor))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ctrl-C 時結束
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
