use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral loopback port for the lifetime of the test runtime.
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream listener");
    let addr = listener.local_addr().expect("upstream address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });
    addr
}
