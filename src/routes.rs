use actix_web::web;
use crate::auth::{check, signin, signup};
use crate::errors::ApiError;

/// Malformed or wrong-typed JSON bodies answer with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into())
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg
        .service(
        web::scope("/api/v1/auth")
            .app_data(json_config())
            .route("/signin", web::post().to(signin))
            .route("/signup", web::post().to(signup))
            .route("/{mode}/validate", web::post().to(check))
    );
}
