use std::{
    net::TcpListener,
    process::{Command, Output},
};

use once_cell::sync::Lazy;
use tracing::Level;
use wiremock::{matchers::any, Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    use status_check::trace::*;

    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(TraceSettings {
            level: Level::DEBUG,
            writer: std::io::stdout,
        }));
    } else {
        init_subscriber(get_subscriber(TraceSettings {
            level: Level::DEBUG,
            writer: std::io::sink,
        }));
    }
});

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Starts an endpoint answering every request with `status`, expecting `hits` requests.
pub async fn spawn_endpoint(status: u16, hits: u64) -> MockServer {
    init_tracing();

    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(status))
        .expect(hits)
        .mount(&mock_server)
        .await;
    mock_server
}

/// An address nothing listens on.
pub fn unused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub async fn run_cli(args: Vec<String>) -> Output {
    run_cli_with_env(args, Vec::new()).await
}

pub async fn run_cli_with_env(args: Vec<String>, envs: Vec<(&'static str, String)>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_status-check"))
            .args(args)
            .envs(envs)
            .output()
            .expect("failed to run status-check")
    })
    .await
    .expect("failed to join status-check")
}
