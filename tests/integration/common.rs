use ripple_crawler::config::{Config, ReportConfig, UserAgentConfig};
use ripple_crawler::{CrawlState, Orchestrator};
use std::time::Duration;

/// Creates a test configuration with a recognizable user agent
pub fn create_test_config(include_links: bool) -> Config {
    Config {
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        report: ReportConfig { include_links },
        ..Config::default()
    }
}

pub fn create_orchestrator() -> Orchestrator {
    Orchestrator::new(&create_test_config(false)).expect("Failed to create orchestrator")
}

/// A root on a loopback port nothing listens on
pub fn unreachable_root() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{}/", addr)
}

/// Polls until the task for `root` reaches a terminal state
pub async fn wait_for_terminal(orchestrator: &Orchestrator, root: &str) -> CrawlState {
    let task = orchestrator
        .registry()
        .lookup(root)
        .expect("Task was not registered");

    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let state = task.state();
            if state.is_terminal() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("Crawl did not finish in time")
}
