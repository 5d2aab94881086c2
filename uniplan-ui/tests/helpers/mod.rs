//! Shared helpers for uniplan-ui integration tests

use axum::Router;

/// Serve a fixture router on an ephemeral loopback port
///
/// Returns the base URL (no trailing slash). The server task runs until
/// the test process exits.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("fixture server addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fixture server");
    });

    format!("http://{}", addr)
}
