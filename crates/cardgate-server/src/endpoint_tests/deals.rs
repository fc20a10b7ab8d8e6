use actix_web::{http::StatusCode, test::TestRequest};
use cardgate_engine::{CardStore, DealStore};
use cardgate_types::{CardNumber, DealId};
use rust_decimal::Decimal;
use serde_json::json;

use super::helpers::{ivanov_hold, post_json, seeded_engine, send};

#[actix_web::test]
async fn block_returns_deal_id() {
    let engine = seeded_engine();
    let (status, body) = post_json(&engine, "/block", &ivanov_hold("A-100", 5_000)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deal_id": 1 }));

    let card = engine.cards().get(&CardNumber::new("4012888888881881")).unwrap();
    assert_eq!(card.held, Decimal::new(5_000, 0));
}

#[actix_web::test]
async fn block_then_charge_succeeds_once() {
    let engine = seeded_engine();
    post_json(&engine, "/block", &ivanov_hold("A-100", 5_000)).await;

    let charge = json!({ "deal_id": 1, "amount": 5000, "order_id": "A-100" });
    let (status, body) = post_json(&engine, "/charge", &charge).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "Operation": "Success" }));

    let (status, body) = post_json(&engine, "/charge", &charge).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "error": { "error_number": 9, "error_msg": "Unable to execute" } })
    );
}

#[actix_web::test]
async fn insufficient_funds_envelope() {
    let engine = seeded_engine();
    let (status, body) = post_json(&engine, "/block", &ivanov_hold("A-1", 55_556)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["error_number"], 8);
    assert_eq!(body["error"]["error_msg"], "You do not have enough funds on the card");
}

#[actix_web::test]
async fn validation_codes_reach_the_wire() {
    let engine = seeded_engine();
    let cases = [
        ("/card/pan", json!("4012888888881882"), 1),
        ("/card/e_month", json!(13), 2),
        ("/card/holder", json!("PETROV PETR"), 3),
        ("/card/cvv", json!(101), 4),
        ("/deal/order_id", json!(""), 5),
        ("/deal/amount", json!(0), 6),
        ("/card/e_year", json!(2020), 7),
    ];
    for (pointer, value, code) in cases {
        let mut body = ivanov_hold("A-1", 10);
        *body.pointer_mut(pointer).unwrap() = value;
        let (status, response) = post_json(&engine, "/block", &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["error"]["error_number"], code, "{pointer}");
    }
}

#[actix_web::test]
async fn missing_fields_are_taxonomy_errors() {
    let engine = seeded_engine();
    let mut body = ivanov_hold("A-1", 10);
    body["card"].as_object_mut().unwrap().remove("holder");
    let (status, response) = post_json(&engine, "/block", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["error"]["error_number"], 3);
}

#[actix_web::test]
async fn unknown_deal_is_9() {
    let engine = seeded_engine();
    let (_, body) = post_json(&engine, "/charge", &json!({ "deal_id": 77, "amount": 1 })).await;
    assert_eq!(body["error"]["error_number"], 9);
}

#[actix_web::test]
async fn malformed_json_is_400() {
    let engine = seeded_engine();
    for uri in ["/block", "/charge"] {
        let req = TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json");
        let (status, body) = send(&engine, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(body["error"].as_str().unwrap().contains("deserialization"), "{body}");
    }
}

#[actix_web::test]
async fn wrongly_typed_field_is_400() {
    let engine = seeded_engine();
    let charge = json!({ "deal_id": "one", "amount": 1 });
    let (status, _) = post_json(&engine, "/charge", &charge).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn fractional_amounts_are_400() {
    let engine = seeded_engine();
    let mut hold = ivanov_hold("A-1", 0);
    hold["deal"]["amount"] = json!(0.001);
    let (status, body) = post_json(&engine, "/block", &hold).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("whole number"), "{body}");
    assert!(engine.deals().is_empty());

    post_json(&engine, "/block", &ivanov_hold("A-2", 100)).await;
    let charge = json!({ "deal_id": 1, "amount": 99.5 });
    let (status, _) = post_json(&engine, "/charge", &charge).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let card = engine.cards().get(&CardNumber::new("4012888888881881")).unwrap();
    assert_eq!(card.held, Decimal::new(100, 0));
    assert!(engine.deals().get(DealId(1)).is_some());
}
