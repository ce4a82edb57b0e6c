//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;

use edge_query_headers::config::HandlerConfig;
use edge_query_headers::http::HttpServer;
use edge_query_headers::lifecycle::shutdown::Shutdown;
use edge_query_headers::mapping::MappingTable;

/// Build a viewer-request event around a query string.
pub fn viewer_request(querystring: &str) -> Value {
    json!({
        "Records": [{
            "cf": {
                "config": {
                    "distributionDomainName": "d111111abcdef8.cloudfront.net",
                    "distributionId": "EDFDVBD6EXAMPLE",
                    "eventType": "viewer-request",
                    "requestId": "MRVMF7KydIvxMWfJIglgwHQwZsbG2IhRJ07sn9AkKUFSHS9EXAMPLE=="
                },
                "request": {
                    "clientIp": "203.0.113.178",
                    "headers": {
                        "host": [{ "key": "Host", "value": "d111111abcdef8.cloudfront.net" }],
                        "user-agent": [{ "key": "User-Agent", "value": "curl/8.4.0" }]
                    },
                    "method": "GET",
                    "querystring": querystring,
                    "uri": "/get"
                }
            }
        }]
    })
}

/// Start the harness on an ephemeral port.
///
/// Returns the bound address and the coordinator that stops it.
pub async fn start_harness(mapping: MappingTable) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(HandlerConfig::default(), Arc::new(mapping));
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
