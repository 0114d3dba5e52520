extern crate items_api;

use items_api::item_repository::ItemRepository;
use items_api::warp_api::routes;
use serde_json::json;
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use warp::http::StatusCode;
use warp::test::request;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

fn new_api() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + 'static {
    routes(Arc::new(Mutex::new(ItemRepository::new())))
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body is not JSON")
}

#[tokio::test]
async fn lists_empty_collection() {
    let api = new_api();
    let resp = request().method("GET").path("/items").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.body()), json!([]));
}

#[tokio::test]
async fn creates_and_fetches_item() {
    let api = new_api();
    let resp = request()
        .method("POST")
        .path("/items")
        .json(&json!({"id": 77, "name": "a"}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp.body()), json!({"id": 1, "name": "a"}));

    let resp = request().method("GET").path("/items/1").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.body()), json!({"id": 1, "name": "a"}));

    let resp = request().method("GET").path("/items").reply(&api).await;
    assert_eq!(body_json(resp.body()), json!([{"id": 1, "name": "a"}]));
}

#[tokio::test]
async fn empty_post_body_creates_bare_item() {
    let api = new_api();
    let resp = request().method("POST").path("/items").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp.body()), json!({"id": 1}));
}

#[tokio::test]
async fn missing_item_is_404_with_message() {
    let api = new_api();
    for path in &["/items/5", "/items/abc"] {
        let resp = request().method("GET").path(path).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(resp.body()),
            json!({"message": "Elemento no encontrado"})
        );
    }

    let resp = request()
        .method("PUT")
        .path("/items/5")
        .json(&json!({"name": "b"}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp.body()),
        json!({"message": "Elemento no encontrado"})
    );
}

#[tokio::test]
async fn put_merges_and_may_change_id() {
    let api = new_api();
    request()
        .method("POST")
        .path("/items")
        .json(&json!({"name": "a", "x": 1}))
        .reply(&api)
        .await;

    let resp = request()
        .method("PUT")
        .path("/items/1")
        .json(&json!({"name": "b"}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.body()), json!({"id": 1, "name": "b", "x": 1}));

    let resp = request()
        .method("PUT")
        .path("/items/1")
        .json(&json!({"id": 40}))
        .reply(&api)
        .await;
    assert_eq!(body_json(resp.body()), json!({"id": 40, "name": "b", "x": 1}));

    let resp = request().method("GET").path("/items/40").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let api = new_api();
    let resp = request()
        .method("POST")
        .path("/items")
        .body("{not json")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp.body())["message"].is_string());

    let resp = request()
        .method("POST")
        .path("/items")
        .json(&json!([1, 2]))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_always_succeeds() {
    let api = new_api();
    let deleted = json!({"message": "Elemento eliminado correctamente"});
    for path in &["/items/1", "/items/abc"] {
        let resp = request().method("DELETE").path(path).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp.body()), deleted);
    }
}

#[tokio::test]
async fn delete_removes_all_duplicates() {
    let api = new_api();
    for _ in 0..3 {
        request().method("POST").path("/items").reply(&api).await;
    }
    request().method("DELETE").path("/items/2").reply(&api).await;
    let resp = request().method("POST").path("/items").reply(&api).await;
    assert_eq!(body_json(resp.body()), json!({"id": 3}));

    let resp = request().method("GET").path("/items").reply(&api).await;
    assert_eq!(body_json(resp.body()), json!([{"id": 1}, {"id": 3}, {"id": 3}]));

    request().method("DELETE").path("/items/3").reply(&api).await;
    let resp = request().method("GET").path("/items").reply(&api).await;
    assert_eq!(body_json(resp.body()), json!([{"id": 1}]));
}

#[tokio::test]
async fn percent_encoded_id_addresses_item() {
    let api = new_api();
    request()
        .method("POST")
        .path("/items")
        .json(&json!({"name": "a"}))
        .reply(&api)
        .await;

    for path in &["/items/%31", "/items/%201"] {
        let resp = request().method("GET").path(path).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp.body()), json!({"id": 1, "name": "a"}));
    }

    let resp = request()
        .method("PUT")
        .path("/items/%31")
        .json(&json!({"name": "b"}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.body()), json!({"id": 1, "name": "b"}));

    let resp = request().method("DELETE").path("/items/%31").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = request().method("GET").path("/items").reply(&api).await;
    assert_eq!(body_json(resp.body()), json!([]));
}

#[tokio::test]
async fn put_accepts_integral_float_id() {
    let api = new_api();
    request().method("POST").path("/items").reply(&api).await;

    let resp = request()
        .method("PUT")
        .path("/items/1")
        .json(&json!({"id": 5.0}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.body()), json!({"id": 5}));

    let resp = request()
        .method("PUT")
        .path("/items/5")
        .json(&json!({"id": 5.5}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
