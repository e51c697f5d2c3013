use actix_multipart::form::MultipartFormConfig;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};

use crate::dto::responses::ErrorResponse;
use crate::services::ServiceError;

pub mod products;

/// Upper bound of a whole add-product multipart body.
const MULTIPART_TOTAL_LIMIT: usize = 50 * 1024 * 1024;

/// Register every catalog route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products::add_product)
        .service(products::list_products)
        .service(products::remove_product)
        .service(products::single_product);
}

/// Render a service failure as the JSON failure body.
///
/// Failures carry a real HTTP status (400, 404, 500, 502); the body still has
/// `success: false`, so clients that only inspect `success` keep working.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorResponse::from(err);
    match err {
        ServiceError::Validation(_) | ServiceError::MalformedInput(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Upstream(_) => HttpResponse::BadGateway().json(body),
        ServiceError::Persistence(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// JSON extractor settings answering undecodable bodies with the failure body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected JSON body: {err}");
        let response = error_response(&ServiceError::MalformedInput(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Multipart extractor settings answering undecodable bodies with the failure body.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(MULTIPART_TOTAL_LIMIT)
        .error_handler(|err, _req| {
            log::warn!("Rejected multipart body: {err}");
            let response = error_response(&ServiceError::MalformedInput(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}
