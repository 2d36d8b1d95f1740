use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{Value, json};

use fairway_core::test_helpers::SAMPLE_HOLES;
use fairway_server::build_app;
use fairway_server::config::{LimitsConfig, ServerConfig};

pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with default config.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// Start a test server that holds at most `max_rounds` rounds.
    pub async fn with_max_rounds(max_rounds: usize) -> Self {
        let config = ServerConfig {
            limits: LimitsConfig {
                max_rounds,
                ..LimitsConfig::default()
            },
            ..ServerConfig::default()
        };
        Self::from_config(config).await
    }

    async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }
}

/// The sample 18-hole tee as a JSON request body.
pub fn sample_tee_json() -> Value {
    let holes: Vec<Value> = SAMPLE_HOLES
        .iter()
        .map(|&(par, si)| json!({ "par": par, "stroke_index": si }))
        .collect();
    json!({ "name": "Sample", "slope_rating": 113, "holes": holes })
}

/// Create a round for `names` (handicap index 6 per position) and return
/// its id.
pub async fn create_round(server: &TestServer, names: &[&str], rules: Option<Value>) -> String {
    let players: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, n)| json!({ "display_name": n, "handicap_index": (i as f64 + 1.0) * 6.0 }))
        .collect();
    let mut body = json!({ "players": players, "tee": sample_tee_json() });
    if let Some(rules) = rules {
        body["rules"] = rules;
    }
    let resp = reqwest::Client::new()
        .post(server.api("/rounds"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    body["round_id"].as_str().unwrap().to_string()
}
