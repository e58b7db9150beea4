pub mod employee;

use actix_web::web;

use crate::errors::AppError;

/// Registers the `/employees` routes plus extractor settings that turn
/// malformed bodies and ids into JSON 400 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::resource("/employees/")
            .route(web::post().to(employee::create_employee))
            .route(web::put().to(employee::update_employee)),
    )
    .service(
        web::resource("/employees/{employee_id}")
            .route(web::get().to(employee::get_employee))
            .route(web::patch().to(employee::patch_employee))
            .route(web::delete().to(employee::delete_employee)),
    );
}
