use reqwest::StatusCode;
use serde_json::{json, Value};

use stockroom_client::{ApiClient, LoadedList, ProductRow};
use stockroom_infra::Database;
use stockroom_parties::CreateSupplier;
use stockroom_products::{CreateProduct, UpdateProduct};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        stockroom_observability::init_for_tests();

        // Same router as prod, on a fresh in-memory database and an ephemeral port.
        let db = Database::in_memory().await.expect("failed to open in-memory db");
        let app = stockroom_api::app::build_app(db);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn widget_body(stock: i64, reorder: i64) -> Value {
    json!({
        "name": "Widget",
        "description": "Blue",
        "stockQuantity": stock,
        "reorderLevel": reorder,
        "maximumStockLevel": 100,
        "price": 9.99,
    })
}

async fn create_product(client: &reqwest::Client, srv: &TestServer, body: Value) -> Value {
    let res = client.post(srv.url("/api/products")).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_and_pages_are_served() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    for path in ["/", "/suppliers"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
    }
}

#[tokio::test]
async fn product_crud_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_product(&client, &srv, widget_body(50, 10)).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["stockQuantity"], 50);
    assert!(created["createdAt"].is_string());

    let fetched: Value = client
        .get(srv.url(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let res = client
        .put(srv.url(&format!("/api/products/{id}")))
        .json(&json!({ "price": 12.5, "description": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["price"], 12.5);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["name"], "Widget");

    let list: Vec<Value> = client.get(srv.url("/api/products")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.len(), 1);

    let res = client.delete(srv.url(&format!("/api/products/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Product deleted", "deleted": 1 }));

    let res = client.delete(srv.url(&format!("/api/products/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn invalid_payloads_are_rejected_with_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Missing required field.
    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "Widget" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "validation");
    assert!(body["error"].is_string());

    // Unknown field.
    let mut with_extra = widget_body(1, 1);
    with_extra["colour"] = json!("red");
    let res = client.post(srv.url("/api/products")).json(&with_extra).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Blank name.
    let mut blank = widget_body(1, 1);
    blank["name"] = json!("   ");
    let res = client.post(srv.url("/api/products")).json(&blank).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Malformed JSON.
    let res = client
        .post(srv.url("/api/products"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "validation");

    // Non-numeric id.
    let res = client.get(srv.url("/api/products/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Null for a required field on update.
    let created = create_product(&client, &srv, widget_body(5, 1)).await;
    let id = created["id"].as_i64().unwrap();
    let res = client
        .put(srv.url(&format!("/api/products/{id}")))
        .json(&json!({ "name": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: Vec<Value> = client.get(srv.url("/api/products")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list, vec![created]);
}

#[tokio::test]
async fn update_of_missing_product_is_not_found_and_mutates_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let existing = create_product(&client, &srv, widget_body(50, 10)).await;

    let res = client
        .put(srv.url("/api/products/999"))
        .json(&json!({ "stockQuantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "not_found");

    let list: Vec<Value> = client.get(srv.url("/api/products")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list, vec![existing]);
}

#[tokio::test]
async fn low_stock_follows_reorder_level() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let low = create_product(&client, &srv, widget_body(5, 10)).await;
    let fine = create_product(&client, &srv, widget_body(50, 10)).await;

    let ids = |list: Vec<Value>| list.iter().map(|p| p["id"].as_i64().unwrap()).collect::<Vec<_>>();

    let list: Vec<Value> = client.get(srv.url("/api/products/low-stock")).send().await.unwrap().json().await.unwrap();
    assert_eq!(ids(list), vec![low["id"].as_i64().unwrap()]);

    let fine_id = fine["id"].as_i64().unwrap();
    let res = client
        .put(srv.url(&format!("/api/products/{fine_id}")))
        .json(&json!({ "reorderLevel": 60 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let list: Vec<Value> = client.get(srv.url("/api/products/low-stock")).send().await.unwrap().json().await.unwrap();
    assert_eq!(ids(list), vec![low["id"].as_i64().unwrap(), fine_id]);
}

#[tokio::test]
async fn supplier_export_matches_csv_contract() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Nothing to export yet.
    let res = client.get(srv.url("/api/suppliers/export.csv")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "no_data");

    let res = client
        .post(srv.url("/api/suppliers"))
        .json(&json!({ "name": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["contactInfo"], Value::Null);

    let res = client.get(srv.url("/api/suppliers/export.csv")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let disposition = res.headers()[reqwest::header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(disposition, "attachment; filename=\"suppliers.csv\"");
    assert_eq!(res.text().await.unwrap(), "ID,Name,Contact Info\n1,\"Acme\",\"\"");
}

#[tokio::test]
async fn orders_snapshot_prices_and_cascade() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let product = create_product(&client, &srv, widget_body(50, 10)).await;
    let product_id = product["id"].as_i64().unwrap();

    let res = client
        .post(srv.url("/api/orders"))
        .json(&json!({
            "orderType": "sale",
            "items": [{ "productId": product_id, "quantity": 2, "priceAtOrder": 8.5 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: Value = res.json().await.unwrap();
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["orderType"], "sale");
    assert_eq!(order["items"][0]["priceAtOrder"], 8.5);

    // Orders leave stock untouched.
    let fetched: Value = client
        .get(srv.url(&format!("/api/products/{product_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["stockQuantity"], 50);

    // Unknown product aborts the order.
    let res = client
        .post(srv.url("/api/orders"))
        .json(&json!({
            "orderType": "purchase",
            "items": [{ "productId": 999, "quantity": 1, "priceAtOrder": 1.0 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: Vec<Value> = client.get(srv.url("/api/orders")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.len(), 1);

    let res = client.delete(srv.url(&format!("/api/orders/{order_id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client.get(srv.url(&format!("/api/orders/{order_id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_routes_get_json_not_found() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/api/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn api_client_drives_loaded_lists() {
    let srv = TestServer::spawn().await;
    let api = ApiClient::new(&srv.base_url);
    assert!(api.check_connectivity().await);

    let product = api
        .create_product(&CreateProduct {
            name: "Widget".to_string(),
            description: None,
            stock_quantity: 20,
            reorder_level: 30,
            maximum_stock_level: 100,
            price: 2.5,
        })
        .await
        .unwrap();

    let mut products = LoadedList::new();
    products.replace(api.list_low_stock().await.unwrap());
    let rows = ProductRow::rows(products.items());
    assert_eq!(rows[0].name, "Widget ⚠️ Low Stock");

    let doc = products.export_csv().unwrap();
    assert_eq!(doc.file_name, "products.csv");
    assert_eq!(doc.content.lines().count(), 2);

    let changes = UpdateProduct {
        stock_quantity: Some(Some(80)),
        ..UpdateProduct::default()
    };
    let updated = api.update_product(product.id, &changes).await.unwrap();
    assert_eq!(updated.stock_quantity, 80);
    products.replace(api.list_low_stock().await.unwrap());
    assert!(products.export_csv().is_err());

    let supplier = api
        .create_supplier(&CreateSupplier {
            name: "Acme".to_string(),
            contact_info: Some("orders@acme.test".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(api.list_suppliers().await.unwrap(), vec![supplier.clone()]);
    assert_eq!(api.delete_supplier(supplier.id).await.unwrap(), 1);

    assert_eq!(api.delete_product(product.id).await.unwrap(), 1);
    let err = api.get_product(product.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn wrong_method_gets_json_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (method, path) in [
        (reqwest::Method::DELETE, "/api/products"),
        (reqwest::Method::PUT, "/api/products/low-stock"),
        (reqwest::Method::PATCH, "/api/suppliers/1"),
    ] {
        let res = client.request(method, srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(res.headers().contains_key(reqwest::header::ALLOW));
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["kind"], "method_not_allowed");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn pages_export_the_loaded_rows() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (path, file_name) in [("/", "products.csv"), ("/suppliers", "suppliers.csv")] {
        let html = client.get(srv.url(path)).send().await.unwrap().text().await.unwrap();
        assert!(!html.contains("export.csv\""), "{path} links to the server export");
        assert!(html.contains(&format!("\"{file_name}\",")));
        assert!(html.contains("new Blob("));
        assert!(html.contains("loaded = "));
        assert!(html.contains("No data to export."));
    }
}
