use actix_web::{
    HttpResponse,
    error::ResponseError,
    http::{StatusCode, header::ContentType},
};
use cardgate_types::ConfigError;
use thiserror::Error;

/// Failures of the HTTP boundary itself.
///
/// Taxonomy errors from the engine are not `ServerError`s; they are ordinary
/// responses carrying the error envelope.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(#[from] ConfigError),
    #[error("Payload deserialization error. {0}")]
    CouldNotDeserializePayload(String),
    #[error("{method} is not allowed on {path}")]
    Forbidden { method: String, path: String },
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CouldNotDeserializePayload(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::InitializeError(_) | Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}
