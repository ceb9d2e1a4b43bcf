//! Store-scoped resources: validation, reads and restrict-on-delete.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use backoffice_integration_tests::{TestApp, id_of};

/// A store with one of each reference target, owned by `u1`.
struct Fixture {
    app: TestApp,
    owner: String,
    store: String,
    billboard: String,
    category: String,
    color: String,
    size: String,
}

impl Fixture {
    async fn new() -> Self {
        let app = TestApp::new();
        let owner = app.token("u1");
        let store = app.create_store(&owner, "Main").await;
        let billboard = app
            .create(
                &owner,
                &store,
                "billboards",
                json!({ "label": "Summer", "imageUrl": "https://cdn.example/summer.png" }),
            )
            .await;
        let category = app
            .create(
                &owner,
                &store,
                "categories",
                json!({ "name": "Shirts", "billboardId": billboard }),
            )
            .await;
        let color = app
            .create(&owner, &store, "colors", json!({ "name": "Red", "value": "#ff0000" }))
            .await;
        let size = app
            .create(&owner, &store, "sizes", json!({ "name": "Large", "value": "L" }))
            .await;

        Self {
            app,
            owner,
            store,
            billboard,
            category,
            color,
            size,
        }
    }

    fn product_body(&self, name: &str, price: Value) -> Value {
        json!({
            "name": name,
            "price": price,
            "categoryId": self.category,
            "colorId": self.color,
            "sizeId": self.size,
            "images": [{ "url": "https://cdn.example/shirt.png" }]
        })
    }

    fn uri(&self, resource: &str) -> String {
        format!("/api/{}/{resource}", self.store)
    }
}

#[tokio::test]
async fn test_category_round_trip_is_public() {
    let fx = Fixture::new().await;

    let (status, list) = fx.app.get(&fx.uri("categories"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Shirts");
    assert_eq!(list[0]["billboardId"], fx.billboard.as_str());
    assert_eq!(list[0]["storeId"], fx.store.as_str());

    let uri = format!("{}/{}", fx.uri("categories"), fx.category);
    let (status, shown) = fx.app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(id_of(&shown), fx.category);

    let (status, updated) = fx
        .app
        .patch(
            &uri,
            Some(&fx.owner),
            json!({ "name": "Tops", "billboardId": fx.billboard }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Tops");
}

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let fx = Fixture::new().await;
    let uri = format!("{}/00000000-0000-4000-8000-000000000000", fx.uri("sizes"));

    let (status, body) = fx.app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = fx.app.delete(&uri, Some(&fx.owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_path_id_is_bad_request() {
    let fx = Fixture::new().await;
    let (status, body) = fx.app.get("/api/not-a-uuid/billboards", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = fx
        .app
        .get(&format!("{}/42", fx.uri("colors")), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_color_value_must_start_with_hash() {
    let fx = Fixture::new().await;
    let (status, body) = fx
        .app
        .post(
            &fx.uri("colors"),
            Some(&fx.owner),
            json!({ "name": "Blue", "value": "0000ff" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_billboard_requires_image_url() {
    let fx = Fixture::new().await;
    let (status, body) = fx
        .app
        .post(&fx.uri("billboards"), Some(&fx.owner), json!({ "label": "Winter" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "imageUrl is required");
}

#[tokio::test]
async fn test_category_billboard_must_belong_to_store() {
    let fx = Fixture::new().await;
    let other_store = fx.app.create_store(&fx.owner, "Outlet").await;

    let (status, body) = fx
        .app
        .post(
            &format!("/api/{other_store}/categories"),
            Some(&fx.owner),
            json!({ "name": "Shirts", "billboardId": fx.billboard }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_product_price_below_minimum_rejected() {
    let fx = Fixture::new().await;
    let (status, body) = fx
        .app
        .post(
            &fx.uri("products"),
            Some(&fx.owner),
            fx.product_body("Shirt", json!(0.5)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (_, list) = fx.app.get(&fx.uri("products"), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_product_price_bounds_are_validation_errors() {
    let fx = Fixture::new().await;
    for price in [json!(10_000_000_000_u64), json!(1.005)] {
        let (status, body) = fx
            .app
            .post(&fx.uri("products"), Some(&fx.owner), fx.product_body("Shirt", price.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {price}");
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().starts_with("price"));
    }

    let (status, _) = fx
        .app
        .post(
            &fx.uri("products"),
            Some(&fx.owner),
            fx.product_body("Shirt", json!(9_999_999_999.99)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = fx.app.get(&fx.uri("products"), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_product_requires_images() {
    let fx = Fixture::new().await;
    let mut body = fx.product_body("Shirt", json!(25));
    body["images"] = json!([]);

    let (status, body) = fx.app.post(&fx.uri("products"), Some(&fx.owner), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "images is required");
}

#[tokio::test]
async fn test_product_listing_filters_and_hides_archived() {
    let fx = Fixture::new().await;
    let featured = {
        let mut body = fx.product_body("Featured Shirt", json!(30));
        body["isFeatured"] = json!(true);
        fx.app.create(&fx.owner, &fx.store, "products", body).await
    };
    let archived = {
        let mut body = fx.product_body("Old Shirt", json!(10));
        body["isArchived"] = json!(true);
        fx.app.create(&fx.owner, &fx.store, "products", body).await
    };
    fx.app
        .create(&fx.owner, &fx.store, "products", fx.product_body("Plain Shirt", json!(20)))
        .await;

    let (_, all) = fx.app.get(&fx.uri("products"), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert!(all.as_array().unwrap().iter().all(|p| p["id"] != archived.as_str()));

    let (_, only_featured) = fx
        .app
        .get(&format!("{}?isFeatured=true", fx.uri("products")), None)
        .await;
    assert_eq!(only_featured.as_array().unwrap().len(), 1);
    assert_eq!(only_featured[0]["id"], featured.as_str());
    assert_eq!(only_featured[0]["images"].as_array().unwrap().len(), 1);

    let (status, shown) = fx
        .app
        .get(&format!("{}/{archived}", fx.uri("products")), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["isArchived"], true);
}

#[tokio::test]
async fn test_product_update_replaces_images() {
    let fx = Fixture::new().await;
    let product = fx
        .app
        .create(&fx.owner, &fx.store, "products", fx.product_body("Shirt", json!(25)))
        .await;

    let mut body = fx.product_body("Shirt", json!(25));
    body["images"] = json!([
        { "url": "https://cdn.example/front.png" },
        { "url": "https://cdn.example/back.png" }
    ]);
    let (status, updated) = fx
        .app
        .patch(&format!("{}/{product}", fx.uri("products")), Some(&fx.owner), body)
        .await;
    assert_eq!(status, StatusCode::OK);

    let urls: Vec<&str> = updated["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|image| image["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        ["https://cdn.example/front.png", "https://cdn.example/back.png"]
    );
}

#[tokio::test]
async fn test_referenced_billboard_delete_blocked() {
    let fx = Fixture::new().await;
    let uri = format!("{}/{}", fx.uri("billboards"), fx.billboard);

    let (status, body) = fx.app.delete(&uri, Some(&fx.owner)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "integrity_blocked");
    assert_eq!(body["blockedBy"], "category");

    let (status, _) = fx.app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unreferenced_color_and_size_delete() {
    let fx = Fixture::new().await;

    let color_uri = format!("{}/{}", fx.uri("colors"), fx.color);
    let (status, deleted) = fx.app.delete(&color_uri, Some(&fx.owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["value"], "#ff0000");

    let size_uri = format!("{}/{}", fx.uri("sizes"), fx.size);
    let (status, _) = fx.app.delete(&size_uri, Some(&fx.owner)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = fx.app.get(&color_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_products_release_references_once_deleted() {
    let fx = Fixture::new().await;
    let product = fx
        .app
        .create(&fx.owner, &fx.store, "products", fx.product_body("Shirt", json!(25)))
        .await;

    let color_uri = format!("{}/{}", fx.uri("colors"), fx.color);
    let (status, body) = fx.app.delete(&color_uri, Some(&fx.owner)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["blockedBy"], "product");

    let (status, _) = fx
        .app
        .delete(&format!("{}/{product}", fx.uri("products")), Some(&fx.owner))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = fx.app.delete(&color_uri, Some(&fx.owner)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_owner_delete_forbidden_before_lookup() {
    let fx = Fixture::new().await;
    let intruder = fx.app.token("u2");
    let uri = format!("{}/{}", fx.uri("sizes"), fx.size);

    let (status, _) = fx.app.delete(&uri, Some(&intruder)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = fx.app.delete(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_owner_update_forbidden_and_row_unchanged() {
    let fx = Fixture::new().await;
    let intruder = fx.app.token("u2");
    let product = fx
        .app
        .create(&fx.owner, &fx.store, "products", fx.product_body("Shirt", json!(25)))
        .await;

    let billboard_uri = format!("{}/{}", fx.uri("billboards"), fx.billboard);
    let (status, body) = fx
        .app
        .patch(
            &billboard_uri,
            Some(&intruder),
            json!({ "label": "Hijacked", "imageUrl": "https://evil.example/x.png" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (_, shown) = fx.app.get(&billboard_uri, None).await;
    assert_eq!(shown["label"], "Summer");
    assert_eq!(shown["imageUrl"], "https://cdn.example/summer.png");

    let product_uri = format!("{}/{product}", fx.uri("products"));
    let (status, _) = fx
        .app
        .patch(
            &product_uri,
            Some(&intruder),
            fx.product_body("Hijacked", json!(1)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, shown) = fx.app.get(&product_uri, None).await;
    assert_eq!(shown["name"], "Shirt");

    let (status, _) = fx
        .app
        .patch(&product_uri, None, fx.product_body("Anonymous", json!(1)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_id_in_body_is_ignored() {
    let fx = Fixture::new().await;
    let other_store = fx.app.create_store(&fx.owner, "Outlet").await;

    let size = fx
        .app
        .create(
            &fx.owner,
            &fx.store,
            "sizes",
            json!({ "name": "Small", "value": "S", "storeId": other_store }),
        )
        .await;

    let (_, here) = fx.app.get(&fx.uri("sizes"), None).await;
    assert!(here.as_array().unwrap().iter().any(|s| s["id"] == size.as_str()));
    assert!(here.as_array().unwrap().iter().all(|s| s["storeId"] == fx.store.as_str()));

    let (_, there) = fx.app.get(&format!("/api/{other_store}/sizes"), None).await;
    assert_eq!(there, json!([]));
}
