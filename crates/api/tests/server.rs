//! End-to-end tests over a real TCP listener.

use std::net::SocketAddr;
use std::time::Duration;

use catalog::AboutResponse;
use reqwest::StatusCode;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), api::error::ServerError>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(api::serve(listener, async {
            let _ = rx.await;
        }));
        Self {
            addr,
            shutdown,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[cfg(target_os = "linux")]
fn client_from(ip: std::net::Ipv4Addr) -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .local_address(std::net::IpAddr::V4(ip))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_about_over_tcp() {
    let server = TestServer::start().await;

    let response = client().get(server.url("/about.json")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );

    let about: AboutResponse = response.json().await.unwrap();
    assert_eq!(about.client.host, "127.0.0.1");
    assert_eq!(about.server.services, catalog::services());

    server.stop().await;
}

#[tokio::test]
async fn test_forwarded_for_does_not_override_peer() {
    let server = TestServer::start().await;

    let about: AboutResponse = client()
        .get(server.url("/about.json"))
        .header("x-forwarded-for", "198.51.100.23")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(about.client.host, "127.0.0.1");

    server.stop().await;
}

#[tokio::test]
async fn test_current_time_is_non_decreasing() {
    let server = TestServer::start().await;
    let client = client();

    let mut last = i64::MIN;
    for _ in 0..5 {
        let before = chrono::Utc::now().timestamp();
        let about: AboutResponse = client
            .get(server.url("/about.json"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let after = chrono::Utc::now().timestamp();

        assert!(about.server.current_time >= last);
        assert!((before - 2..=after + 2).contains(&about.server.current_time));
        last = about.server.current_time;
    }

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let server = TestServer::start().await;
    let client = client();

    let mut tasks = Vec::new();
    for _ in 0..100 {
        let client = client.clone();
        let url = server.url("/about.json");
        tasks.push(tokio::spawn(async move {
            let response = client.get(url).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            response.json::<AboutResponse>().await.unwrap()
        }));
    }

    for task in tasks {
        let about = task.await.unwrap();
        assert_eq!(about.client.host, "127.0.0.1");
        assert_eq!(about.server.services, catalog::services());
    }

    server.stop().await;
}

// Linux routes all of 127.0.0.0/8 to loopback, so each client can use its own source address.
#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_see_their_own_host() {
    let server = TestServer::start().await;

    let mut tasks = Vec::new();
    for i in 0..100u8 {
        let source = std::net::Ipv4Addr::new(127, 0, 0, 2 + i % 8);
        let url = server.url("/about.json");
        tasks.push(tokio::spawn(async move {
            let about: AboutResponse = client_from(source)
                .get(url)
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            (source, about)
        }));
    }

    for task in tasks {
        let (source, about) = task.await.unwrap();
        assert_eq!(about.client.host, source.to_string());
    }

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_path_over_tcp() {
    let server = TestServer::start().await;

    let response = client().get(server.url("/about")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let config = api::config::Config {
        host: "127.0.0.1".to_string(),
        port,
        ..Default::default()
    };
    let err = tokio::time::timeout(Duration::from_secs(5), api::run(config))
        .await
        .expect("server started on a port that is already taken")
        .unwrap_err();
    assert!(matches!(err, api::error::ServerError::Bind { .. }));
    drop(taken);
}
