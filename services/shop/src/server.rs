//! Serving the router until shutdown

use std::future::Future;

use axum::Router;
use common::database::close_pool;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tracing::info;

/// Serve `app` until `shutdown` resolves, then close the pool
///
/// The pool is closed whether serving ended cleanly or with an error.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    pool: SqlitePool,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    close_pool(pool).await;
    info!("Shop service stopped");

    served
}
