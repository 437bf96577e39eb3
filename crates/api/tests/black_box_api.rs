use reqwest::{redirect, StatusCode};
use vitrine_api::app::{build_app, AppConfig};

struct TestServer {
    base_url: String,
    upload_dir: std::path::PathBuf,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, isolated upload dir,
        // ephemeral port.
        let upload_dir =
            std::env::temp_dir().join(format!("vitrine-test-{}", uuid::Uuid::now_v7()));
        let config = AppConfig {
            use_persistent_store: false,
            database_url: None,
            upload_dir: upload_dir.clone(),
        };

        let app = build_app(config).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            upload_dir,
            handle,
        }
    }

    /// Client that surfaces redirects instead of following them.
    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

async fn first_supplier_id(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .get(format!("{}/suppliers", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let suppliers = body["suppliers"].as_array().unwrap();
    assert!(!suppliers.is_empty(), "in-memory store should seed suppliers");
    suppliers[0]["id"].as_str().unwrap().to_string()
}

fn product_form(supplier_id: &str, price: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("name", "Desk Lamp")
        .text("description", "Adjustable desk lamp")
        .text("price", price.to_string())
        .text("supplier_id", supplier_id.to_string())
        .text("active", "true")
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let srv = TestServer::spawn().await;
    let res = TestServer::client()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_with_image_persists_and_redirects_to_listing() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();
    let supplier_id = first_supplier_id(&client, &srv.base_url).await;

    let image = reqwest::multipart::Part::bytes(b"png-bytes".to_vec()).file_name("lamp.png");
    let form = product_form(&supplier_id, "199.90").part("image", image);

    let res = client
        .post(format!("{}/products", srv.base_url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/products");

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);

    let image_name = products[0]["image"].as_str().unwrap();
    assert!(image_name.ends_with("_lamp.png"), "got {image_name}");
    assert!(srv.upload_dir.join(image_name).exists());
    assert_eq!(products[0]["supplier"]["id"].as_str().unwrap(), supplier_id);
}

#[tokio::test]
async fn invalid_price_rerenders_the_form_with_suppliers_and_persists_nothing() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();
    let supplier_id = first_supplier_id(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .multipart(product_form(&supplier_id, "abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = res.json().await.unwrap();
    let notifications = body["notifications"].as_array().unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.as_str().unwrap().contains("monetary")));
    assert!(!body["suppliers"].as_array().unwrap().is_empty());
    // Entered values come back unchanged.
    assert_eq!(body["form"]["price"].as_str().unwrap(), "abc");

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_image_is_rejected_through_the_notification_path() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();
    let supplier_id = first_supplier_id(&client, &srv.base_url).await;

    let image = reqwest::multipart::Part::bytes(Vec::new()).file_name("empty.png");
    let form = product_form(&supplier_id, "10.00").part("image", image);

    let res = client
        .post(format!("{}/products", srv.base_url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = res.json().await.unwrap();
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].as_str().unwrap(), "invalid file");
}

#[tokio::test]
async fn edit_updates_fields_and_keeps_creation_metadata() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();
    let supplier_id = first_supplier_id(&client, &srv.base_url).await;

    // Create without an image.
    let res = client
        .post(format!("{}/products", srv.base_url))
        .multipart(product_form(&supplier_id, "199.90"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let product = &body["products"].as_array().unwrap()[0];
    let id = product["id"].as_str().unwrap().to_string();
    let created_at = product["created_at"].as_str().unwrap().to_string();
    assert!(product["image"].is_null());

    // Edit form is pre-filled.
    let res = client
        .get(format!("{}/products/{}/edit", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["form"]["name"].as_str().unwrap(), "Desk Lamp");

    // Submit the update as a urlencoded form.
    let res = client
        .post(format!("{}/products/{}", srv.base_url, id))
        .form(&[
            ("name", "Desk Lamp XL"),
            ("description", "Bigger lamp"),
            ("price", "249,90"),
            ("supplier_id", supplier_id.as_str()),
            ("active", "false"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["product"]["name"].as_str().unwrap(), "Desk Lamp XL");
    assert_eq!(body["product"]["price"].as_str().unwrap(), "249.90");
    assert_eq!(body["product"]["created_at"].as_str().unwrap(), created_at);
    assert!(body["product"]["image"].is_null());
}

#[tokio::test]
async fn edit_failure_rerenders_without_the_supplier_list() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();
    let supplier_id = first_supplier_id(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .multipart(product_form(&supplier_id, "199.90"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["products"][0]["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/products/{}", srv.base_url, id))
        .form(&[
            ("name", ""),
            ("description", "Bigger lamp"),
            ("price", "249,90"),
            ("supplier_id", supplier_id.as_str()),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["suppliers"].as_array().unwrap().is_empty());
    assert!(!body["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn detail_of_unknown_product_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();

    let res = client
        .get(format!("{}/products/{}", srv.base_url, uuid::Uuid::now_v7()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/products/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_an_unknown_id_still_redirects() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();

    let res = client
        .post(format!(
            "{}/products/{}/delete",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/products");
}

#[tokio::test]
async fn delete_flow_confirms_then_removes() {
    let srv = TestServer::spawn().await;
    let client = TestServer::client();
    let supplier_id = first_supplier_id(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .multipart(product_form(&supplier_id, "199.90"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["products"][0]["id"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/products/{}/delete", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["product"]["id"].as_str().unwrap(), id);

    let res = client
        .post(format!("{}/products/{}/delete", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["products"].as_array().unwrap().is_empty());
}
