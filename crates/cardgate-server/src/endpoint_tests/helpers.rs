use actix_web::{
    App,
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use cardgate_engine::FixedClock;
use cardgate_types::GatewayConfig;
use serde_json::Value;

use crate::routes::{self, Engine};

pub fn seeded_engine() -> web::Data<Engine> {
    let engine = Engine::from_config(&GatewayConfig::default())
        .unwrap()
        .with_clock(FixedClock::ymd(2026, 10, 19).unwrap());
    web::Data::new(engine)
}

/// Send `req` to a fresh app around `engine`; returns status and body.
pub async fn send(engine: &web::Data<Engine>, req: TestRequest) -> (StatusCode, String) {
    let app = App::new()
        .app_data(engine.clone())
        .configure(routes::configure);
    let app = test::init_service(app).await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn post_json(
    engine: &web::Data<Engine>,
    uri: &str,
    body: &Value,
) -> (StatusCode, Value) {
    let (status, body) = send(engine, TestRequest::post().uri(uri).set_json(body)).await;
    let json = serde_json::from_str(&body).unwrap_or_else(|e| panic!("not JSON ({e}): {body}"));
    (status, json)
}

pub fn ivanov_hold(order: &str, amount: i64) -> Value {
    serde_json::json!({
        "merchant_contract_id": 1,
        "card": {
            "pan": "4012 8888 8888 1881",
            "e_month": 9,
            "e_year": 2030,
            "cvv": 100,
            "holder": "IVANOV IVAN"
        },
        "deal": { "order_id": order, "amount": amount }
    })
}
