use std::sync::Arc;

use actix_web::{App, test, web};
use async_trait::async_trait;
use product_catalog::domain::types::ImageUrl;
use product_catalog::image_store::{ImageStore, ImageStoreError, ImageUpload, UploadedImage};
use product_catalog::repository::DieselRepository;
use product_catalog::routes::{configure, json_config, multipart_config};
use serde_json::{Value, json};

mod common;

/// Image store that hands out a URL derived from the slot name.
struct StaticImageStore;

#[async_trait]
impl ImageStore for StaticImageStore {
    async fn upload(&self, image: &ImageUpload) -> Result<UploadedImage, ImageStoreError> {
        Ok(UploadedImage {
            url: ImageUrl::new(format!("https://images.test/{}.jpg", image.slot))
                .expect("valid url"),
            public_id: image.slot.to_string(),
        })
    }

    async fn remove(&self, _image: &UploadedImage) -> Result<(), ImageStoreError> {
        Ok(())
    }
}

const BOUNDARY: &str = "----catalog-test-boundary";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Encode text fields and `(field, file name, bytes)` files as multipart/form-data.
fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn add_request(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/product/add")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(fields, files))
}

macro_rules! init_app {
    ($test_db:expr) => {{
        let image_store: Arc<dyn ImageStore> = Arc::new(StaticImageStore);
        test::init_service(
            App::new()
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new(image_store))
                .app_data(json_config())
                .app_data(multipart_config())
                .configure(configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn lists_empty_catalog() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/api/product/list").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"success": true, "products": []}));
}

#[actix_web::test]
async fn adds_product_and_lists_it() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = add_request(
        &[
            ("name", "Tee"),
            ("price", "19.99"),
            ("category", "Shirts"),
            ("subCategory", "Topwear"),
            ("sizes", "[\"S\",\"M\",\"L\"]"),
            ("bestseller", "true"),
        ],
        &[
            ("image4", "back.jpg", JPEG_MAGIC),
            ("image2", "front.jpg", JPEG_MAGIC),
        ],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"success": true, "message": "Product Added Successfully"})
    );

    let req = test::TestRequest::get().uri("/api/product/list").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let product = &body["products"][0];

    assert_eq!(product["name"], "Tee");
    assert_eq!(product["price"], 19.99);
    assert_eq!(product["subCategory"], "Topwear");
    assert_eq!(product["sizes"], json!(["S", "M", "L"]));
    assert_eq!(product["bestseller"], true);
    assert_eq!(
        product["image"],
        json!([
            "https://images.test/image2.jpg",
            "https://images.test/image4.jpg"
        ])
    );
}

#[actix_web::test]
async fn rejects_product_without_required_fields() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = add_request(&[("name", "Tee"), ("category", "Shirts")], &[]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation");
    assert_eq!(body["message"], "Please fill all required fields");

    let req = test::TestRequest::get().uri("/api/product/list").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["products"], json!([]));
}

#[actix_web::test]
async fn rejects_malformed_sizes() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = add_request(
        &[
            ("name", "Tee"),
            ("price", "1"),
            ("category", "Shirts"),
            ("sizes", "not-json"),
        ],
        &[],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "malformed_input");
}

#[actix_web::test]
async fn single_product_distinguishes_not_found() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/product/single")
        .set_json(json!({"productId": "77"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"success": false, "error": "not_found", "message": "Product not found"})
    );
}

#[actix_web::test]
async fn single_product_returns_stored_product() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = add_request(&[("name", "Tee"), ("price", "5"), ("category", "Shirts")], &[])
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get().uri("/api/product/list").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["products"][0]["id"].clone();

    let req = test::TestRequest::post()
        .uri("/api/product/single")
        .set_json(json!({"productId": id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["product"]["name"], "Tee");
    assert_eq!(body["product"]["image"], json!([]));
    assert_eq!(body["product"]["bestseller"], false);
}

#[actix_web::test]
async fn remove_succeeds_for_unknown_id() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/product/remove")
        .set_json(json!({"id": 12345}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({"success": true, "message": "Product Removed Successfully"})
    );
}

#[actix_web::test]
async fn remove_rejects_malformed_body() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/product/remove")
        .set_json(json!({"productId": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "malformed_input");
}

#[actix_web::test]
async fn store_failures_answer_with_persistence_error() {
    let test_db = common::TestDb::unmigrated();
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/api/product/list").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "persistence");

    let req = test::TestRequest::post()
        .uri("/api/product/single")
        .set_json(json!({"productId": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "persistence");
}
