use actix_web::{http::StatusCode, test::TestRequest};

use super::helpers::{seeded_engine, send};

#[actix_web::test]
async fn root_is_forbidden() {
    let engine = seeded_engine();
    let (status, body) = send(&engine, TestRequest::get().uri("/")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("not allowed"), "{body}");
}

#[actix_web::test]
async fn non_post_methods_are_forbidden() {
    let engine = seeded_engine();
    for uri in ["/block", "/charge"] {
        for req in [
            TestRequest::get(),
            TestRequest::put(),
            TestRequest::delete(),
            TestRequest::patch(),
        ] {
            let (status, _) = send(&engine, req.uri(uri)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        }
    }
}

#[actix_web::test]
async fn forbidden_requests_change_nothing() {
    let engine = seeded_engine();
    send(&engine, TestRequest::get().uri("/block")).await;
    assert!(cardgate_engine::DealStore::is_empty(engine.deals()));
}
