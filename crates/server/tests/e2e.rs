use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::build_app;
use server::state::AppState;

struct TestApp {
    base_url: String,
    data_dir: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let data_dir = std::env::temp_dir().join(format!("hub_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.data_dir = data_dir.clone();
    cfg.auth.jwt_secret = "e2e-secret".into();

    let app = build_app(AppState::open(&cfg).await?);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, data_dir })
}

#[tokio::test]
async fn e2e_books_persist_to_disk() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = client
        .post(format!("{}/books", app.base_url))
        .json(&json!({"title": "book title", "author": "Ali", "year": 2025}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert!(res.headers()[reqwest::header::CONTENT_TYPE].to_str()?.starts_with("application/json"));
    let body: Value = res.json().await?;
    let id = body["data"]["book"]["id"].as_u64().unwrap();

    let res = client
        .patch(format!("{}/books/{id}", app.base_url))
        .json(&json!({"title": "updated title"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let on_disk: Value = serde_json::from_slice(&tokio::fs::read(app.data_dir.join("books.json")).await?)?;
    assert_eq!(on_disk, json!([{"id": id, "title": "updated title", "author": "Ali", "year": 2025}]));

    let res = client.delete(format!("{}/books/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = client.get(format!("{}/books/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}
