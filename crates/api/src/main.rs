use vitrine_api::app::{build_app, AppConfig};

#[tokio::main]
async fn main() {
    vitrine_observability::init();

    let config = AppConfig::from_env();
    let app = build_app(config).await;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
