use crate::common::{create_orchestrator, unreachable_root, wait_for_terminal};
use ripple_crawler::config::ClientConfig;
use ripple_crawler::control::{serve_with_shutdown, ControlClient};
use ripple_crawler::{CrawlState, CrawlerError, Orchestrator};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A control server bound to an ephemeral loopback port
struct TestServer {
    address: String,
    orchestrator: Arc<Orchestrator>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<ripple_crawler::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind control server");
        let address = format!("http://{}", listener.local_addr().unwrap());
        let orchestrator = Arc::new(create_orchestrator());
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve_with_shutdown(
            listener,
            Arc::clone(&orchestrator),
            async {
                let _ = rx.await;
            },
        ));

        Self {
            address,
            orchestrator,
            shutdown: Some(tx),
            handle,
        }
    }

    fn client(&self) -> ControlClient {
        ControlClient::new(&ClientConfig {
            address: self.address.clone(),
            request_timeout_ms: 5000,
        })
        .expect("Failed to build client")
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle
            .await
            .expect("Server task panicked")
            .expect("Server returned an error");
    }
}

async fn collect_list(client: &ControlClient) -> Vec<String> {
    let mut lines = Vec::new();
    let count = client
        .list("*", |reply| lines.push(reply.message))
        .await
        .expect("List failed");
    assert_eq!(count, lines.len());
    lines
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;

    let body = reqwest::get(format!("{}/health", server.address))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");

    server.stop().await;
}

#[tokio::test]
async fn test_list_empty_over_http() {
    let server = TestServer::start().await;
    let client = server.client();

    assert!(collect_list(&client).await.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_start_stop_list_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="http://x.example/">x</a><a href="http://y.example/">y</a>"#),
        )
        .mount(&mock_server)
        .await;
    let root = format!("{}/", mock_server.uri());

    let server = TestServer::start().await;
    let client = server.client();

    assert_eq!(client.start(&root).await.unwrap().message, "Started!");

    assert_eq!(
        wait_for_terminal(&server.orchestrator, &root).await,
        CrawlState::Done
    );
    assert_eq!(client.start(&root).await.unwrap().message, "Crawl Done!");

    let lines = collect_list(&client).await;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(&format!("{}: Done, 2 links", root)));

    assert_eq!(
        client.stop(&root).await.unwrap().message,
        format!("Stopping {}", root)
    );
    assert_eq!(
        client.stop("http://other.example/").await.unwrap().message,
        "Not Running: http://other.example/"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_failed_crawl_visible_over_http() {
    let server = TestServer::start().await;
    let client = server.client();
    let root = unreachable_root();

    assert_eq!(client.start(&root).await.unwrap().message, "Started!");
    assert_eq!(
        wait_for_terminal(&server.orchestrator, &root).await,
        CrawlState::Failed
    );

    let lines = collect_list(&client).await;
    assert!(lines[0].starts_with(&format!("{}: Failed, 0 links", root)));

    server.stop().await;
}

#[tokio::test]
async fn test_bad_request_is_reported() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .post(format!("{}/start", server.address))
        .header("content-type", "application/json")
        .body("{\"not-root\": 1}")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert!(server.orchestrator.registry().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_client_reports_unreachable_server() {
    let client = ControlClient::new(&ClientConfig {
        address: unreachable_root(),
        request_timeout_ms: 1000,
    })
    .unwrap();

    assert!(matches!(
        client.start("http://example.com/").await,
        Err(CrawlerError::Reqwest(_))
    ));
}
