//! Request handler definitions
//!
//! `POST /block` places a hold, `POST /charge` captures one. Any other method
//! on those paths, and `/` itself, is forbidden.
//!
//! Engine rejections are answered with `200 OK` and the error envelope. Only
//! bodies that are not valid JSON for the request shape get a `400`; that
//! includes amounts that are not whole numbers.
//!
//! Engine calls take a per-card mutex for a handful of arithmetic steps and
//! never wait on I/O, so they run directly on the worker.

use actix_web::{HttpRequest, HttpResponse, web};
use cardgate_engine::AuthorizationEngine;
use cardgate_types::{ChargeRequest, ChargeResponse, HoldRequest, HoldResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::errors::ServerError;

/// Engine shared by all workers.
pub type Engine = AuthorizationEngine;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/block")
            .route(web::post().to(block))
            .default_service(web::to(forbidden)),
    )
    .service(
        web::resource("/charge")
            .route(web::post().to(charge))
            .default_service(web::to(forbidden)),
    )
    .service(web::resource("/").to(forbidden));
}

pub async fn block(
    body: web::Bytes,
    engine: web::Data<Engine>,
) -> Result<HttpResponse, ServerError> {
    trace!("Received block request");
    let request: HoldRequest = decode(&body)?;
    let response = match engine.hold(&request) {
        Ok(deal_id) => HttpResponse::Ok().json(HoldResponse { deal_id }),
        Err(e) => HttpResponse::Ok().json(e.envelope()),
    };
    Ok(response)
}

pub async fn charge(
    body: web::Bytes,
    engine: web::Data<Engine>,
) -> Result<HttpResponse, ServerError> {
    trace!("Received charge request");
    let request: ChargeRequest = decode(&body)?;
    let response = match engine.capture(request.deal_id, request.amount) {
        Ok(_) => HttpResponse::Ok().json(ChargeResponse::success()),
        Err(e) => HttpResponse::Ok().json(e.envelope()),
    };
    Ok(response)
}

pub async fn forbidden(req: HttpRequest) -> Result<HttpResponse, ServerError> {
    debug!(method = %req.method(), path = req.path(), "Forbidden request");
    Err(ServerError::Forbidden {
        method: req.method().to_string(),
        path: req.path().to_string(),
    })
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Could not deserialize payload. {e}");
        ServerError::CouldNotDeserializePayload(e.to_string())
    })
}
