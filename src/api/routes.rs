use actix_web::web;

use super::error::ApiError;
use super::{documents, handlers};

// Quotation forms carry one field per item column.
const FORM_LIMIT_BYTES: usize = 1_048_576;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Body errors answer with the same JSON shape as handler errors
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
        )
        .app_data(
            web::FormConfig::default()
                .limit(FORM_LIMIT_BYTES)
                .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
        )

        // Form UI and document generation
        .route("/", web::get().to(documents::index))
        .route("/generate", web::post().to(documents::generate))
        .route("/create_files", web::post().to(documents::create_files))
        .route("/download/{filename}", web::get().to(documents::download))

        // Health check
        .route("/health", web::get().to(documents::health))

        // Saved quotations
        .service(
            web::scope("/api")
                .route("/quotations", web::get().to(handlers::list_quotations))
                .route("/save_quotation", web::post().to(handlers::save_quotation))
                .route("/get_quotation/{id}", web::get().to(handlers::get_quotation))
                .route("/delete_quotation/{id}", web::delete().to(handlers::delete_quotation))
        );
}
