//! End-to-end tests driving the HTTP surface over a real socket.

use std::sync::Arc;

use async_trait::async_trait;
use httptest::{matchers::*, responders::*, Expectation, Server};
use hopguard::server::serve;
use hopguard::{
    ClassifierRules, DnsLookup, HostnameGuard, Limits, LookupError, RedirectResolver, ResolvedAddr,
};

struct NullDns;

#[async_trait]
impl DnsLookup for NullDns {
    async fn lookup_all(&self, _host: &str) -> Result<Vec<ResolvedAddr>, LookupError> {
        Ok(vec![])
    }
}

/// Boots the service on an ephemeral port and returns its base URL.
///
/// The loopback entries are removed from the rules so the service can reach
/// local backend servers on either loopback family.
async fn spawn_service() -> String {
    let mut rules = ClassifierRules::default();
    rules.v4_prefixes.retain(|p| p != "127.");
    rules.v6_exact.retain(|e| e != "::1");

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let resolver = Arc::new(RedirectResolver::new(
        client,
        HostnameGuard::new(rules, Arc::new(NullDns)),
        Limits::default(),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = serve(listener, resolver).await;
    });
    format!("http://{addr}")
}

async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_resolves_chain_over_the_wire() {
    let backend = Server::run();
    backend.expect(
        Expectation::matching(request::method_path("GET", "/start"))
            .respond_with(status_code(301).append_header("Location", "/end".to_string())),
    );
    backend.expect(
        Expectation::matching(request::method_path("GET", "/end")).respond_with(status_code(200)),
    );

    let base = spawn_service().await;
    let (status, body) = get_json(&format!(
        "{base}/resolve?url={}",
        backend.url_str("/start")
    ))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(body["finalUrl"], backend.url_str("/end"));
    assert_eq!(body["finalStatus"], 200);
    let chain = body["chain"].as_array().unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0]["status"], 301);
    assert_eq!(chain[0]["location"], "/end");
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_missing_url_parameter() {
    let base = spawn_service().await;
    let (status, body) = get_json(&format!("{base}/resolve")).await;
    assert_eq!(status, 400);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("url"));
}

#[tokio::test]
async fn test_blocked_target_returns_bad_request() {
    let base = spawn_service().await;
    let (status, body) =
        get_json(&format!("{base}/resolve?url=http://192.168.1.1/")).await;
    assert_eq!(status, 400);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("SSRF"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_service().await;
    let (status, body) = get_json(&format!("{base}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}
