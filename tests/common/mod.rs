//! Shared utilities for integration tests.

use std::net::SocketAddr;

use http_echo::config::EchoConfig;
use http_echo::http::HttpServer;
use http_echo::lifecycle::Shutdown;

/// Start an echo server on an ephemeral port.
///
/// Returns the bound address and the shutdown coordinator; dropping the
/// coordinator without triggering it leaves the server task running for
/// the life of the test process, which is fine for test isolation.
pub async fn spawn_echo_server(config: EchoConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
