use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod search;

/// Maps the service error taxonomy onto transport status codes.
///
/// The taxonomy stays tagged up to this point; only here does the transport
/// decide how finely to expose it.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "message": err.to_string() });
    match err {
        ServiceError::Validation(_) => HttpResponse::BadRequest().json(body),
        ServiceError::RepositoryUnreachable | ServiceError::SearchFailed(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}
