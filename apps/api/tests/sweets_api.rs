mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{message, TestApp};

const MISSING_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

// =============================================================================
// Access Control
// =============================================================================

#[tokio::test]
async fn test_admin_routes_refuse_customers() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 10).await;

    let (status, body) = app
        .post(
            "/api/sweets",
            Some(&customer),
            json!({ "name": "Toffee", "category": "Candy", "price": 1.0, "quantity": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message(&body), "Not authorized as an admin");

    let (status, _) = app
        .put(&format!("/api/sweets/{id}"), Some(&customer), json!({ "price": 0.5 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&format!("/api/sweets/{id}"), Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(&format!("/api/sweets/{id}/restock"), Some(&customer), json!({ "amount": 5 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.stock_of(&customer, &id).await, 10);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/sweets",
            None,
            json!({ "name": "Toffee", "category": "Candy", "price": 1.0, "quantity": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_create_and_get_sweet() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/sweets",
            Some(&admin),
            json!({
                "name": "Gummy Bears",
                "category": "Gummies",
                "price": 3.99,
                "quantity": 40,
                "imageUrl": "https://example.com/bears.png",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Gummy Bears");
    assert_eq!(body["price"], 3.99);
    assert_eq!(body["imageUrl"], "https://example.com/bears.png");

    let id = body["_id"].as_str().unwrap();
    let (status, fetched) = app.get(&format!("/api/sweets/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["_id"], id);
    assert_eq!(fetched["quantity"], 40);
}

#[tokio::test]
async fn test_create_sweet_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .post("/api/sweets", Some(&admin), json!({ "name": "Fudge", "price": 1.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Please provide all required fields");

    let (status, _) = app
        .post(
            "/api/sweets",
            Some(&admin),
            json!({ "name": "Fudge", "category": "Candy", "price": -1.0, "quantity": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/sweets",
            Some(&admin),
            json!({ "name": "Fudge", "category": "Candy", "price": 1.0, "quantity": 1.5 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_sweet(&admin, "First", 1.0, 1).await;
    app.create_sweet(&admin, "Second", 1.0, 1).await;
    app.create_sweet(&admin, "Third", 1.0, 1).await;

    let (status, body) = app.get("/api/sweets", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app.get(&format!("/api/sweets/{MISSING_ID}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Sweet not found");

    let (status, body) = app.get("/api/sweets/not-an-id", Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Resource not found");

    let (status, _) = app.delete(&format!("/api/sweets/{MISSING_ID}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 10).await;

    let (status, body) = app
        .put(&format!("/api/sweets/{id}"), Some(&admin), json!({ "price": 3.25 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 3.25);
    assert_eq!(body["name"], "Fudge");
    assert_eq!(body["quantity"], 10);

    let (status, _) = app
        .put(&format!("/api/sweets/{id}"), Some(&admin), json!({ "quantity": -4 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put(&format!("/api/sweets/{MISSING_ID}"), Some(&admin), json!({ "price": 1.0 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Sweet not found");
}

#[tokio::test]
async fn test_delete_sweet() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 10).await;

    let (status, body) = app.delete(&format!("/api/sweets/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), "Sweet removed");

    let (status, _) = app.get(&format!("/api/sweets/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_filters() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    for (name, category, price) in [
        ("Chocolate Truffle", "Chocolate", 5.0),
        ("Milk Chocolate Bar", "Chocolate", 2.0),
        ("Sour Worms", "Gummies", 1.5),
    ] {
        let (status, _) = app
            .post(
                "/api/sweets",
                Some(&admin),
                json!({ "name": name, "category": category, "price": price, "quantity": 5 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let names = |body: &serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = app.get("/api/sweets/search?name=CHOC", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Chocolate Truffle", "Milk Chocolate Bar"]);

    let (_, body) = app.get("/api/sweets/search?category=Gummies", Some(&admin)).await;
    assert_eq!(names(&body), ["Sour Worms"]);

    let (_, body) = app
        .get("/api/sweets/search?minPrice=2&maxPrice=5", Some(&admin))
        .await;
    assert_eq!(names(&body), ["Chocolate Truffle", "Milk Chocolate Bar"]);

    let (_, body) = app
        .get("/api/sweets/search?name=choc&maxPrice=3", Some(&admin))
        .await;
    assert_eq!(names(&body), ["Milk Chocolate Bar"]);

    let (_, body) = app.get("/api/sweets/search?minPrice=", Some(&admin)).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = app.get("/api/sweets/search?minPrice=cheap", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Inventory
// =============================================================================

#[tokio::test]
async fn test_purchase_decrements_by_one() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 2).await;

    let (status, body) = app
        .post(&format!("/api/sweets/{id}/purchase"), Some(&customer), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 1);

    let (status, body) = app
        .post(&format!("/api/sweets/{id}/purchase"), Some(&customer), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn test_purchase_out_of_stock() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 0).await;

    let (status, body) = app
        .post(&format!("/api/sweets/{id}/purchase"), Some(&customer), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Sweet is out of stock");
    assert_eq!(app.stock_of(&customer, &id).await, 0);

    let (status, _) = app
        .post(&format!("/api/sweets/{MISSING_ID}/purchase"), Some(&customer), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restock() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 3).await;

    let (status, body) = app
        .post(&format!("/api/sweets/{id}/restock"), Some(&admin), json!({ "amount": 7 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 10);

    for amount in [json!(0), json!(-5), json!(2.5)] {
        let (status, _) = app
            .post(
                &format!("/api/sweets/{id}/restock"),
                Some(&admin),
                json!({ "amount": amount }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {amount}");
    }

    let (status, _) = app
        .post(&format!("/api/sweets/{id}/restock"), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.stock_of(&admin, &id).await, 10);
}

#[tokio::test]
async fn test_price_and_stock_limits() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .post(
            "/api/sweets",
            Some(&admin),
            json!({ "name": "Gold Bar", "category": "Luxury", "price": 1.0e14, "quantity": 1000 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/sweets",
            Some(&admin),
            json!({ "name": "Sugar Mountain", "category": "Candy", "price": 1.0, "quantity": 2.0e9 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = app.create_sweet(&admin, "Fudge", 2.5, 10).await;
    let (status, _) = app
        .put(&format!("/api/sweets/{id}"), Some(&admin), json!({ "price": 1.0e14 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_restock_past_stock_ceiling() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_sweet(&admin, "Fudge", 2.5, 999_999_990).await;

    let (status, _) = app
        .post(
            &format!("/api/sweets/{id}/restock"),
            Some(&admin),
            json!({ "amount": 9.2e18 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(&format!("/api/sweets/{id}/restock"), Some(&admin), json!({ "amount": 11 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message(&body),
        "Restock would exceed the maximum stock of 1000000000"
    );
    assert_eq!(app.stock_of(&admin, &id).await, 999_999_990);

    let (status, body) = app
        .post(&format!("/api/sweets/{id}/restock"), Some(&admin), json!({ "amount": 10 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 1_000_000_000);

    let (status, _) = app
        .post(
            &format!("/api/sweets/{MISSING_ID}/restock"),
            Some(&admin),
            json!({ "amount": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_name_is_unicode_case_insensitive() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_sweet(&admin, "Crème Brûlée", 6.5, 5).await;
    app.create_sweet(&admin, "Caramel Log", 5.0, 5).await;

    let (status, body) = app
        .get("/api/sweets/search?name=CR%C3%88ME", Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Crème Brûlée");
}
