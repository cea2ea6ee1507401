use std::path::{Component, Path};

use actix_web::http::header::{
    Charset, ContentDisposition, ContentType, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{debug, error};

use super::error::{ApiError, ApiResult};
use super::state::ApiState;
use crate::core::compute_quotation;
use crate::models::{ComputedQuotation, QuotationForm};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Form UI
pub async fn index(state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let html = state.pages.render_index()?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Computes the submitted form and renders the confirmation page
pub async fn generate(
    form: web::Form<Vec<(String, String)>>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let computed = compute_form(&form)?;
    debug!(
        quotation_no = %computed.header.quotation_no,
        items = computed.items.len(),
        "rendering preview"
    );

    let html = state.pages.render_preview(&computed)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Writes the spreadsheet and PDF, then links to them
pub async fn create_files(
    form: web::Form<Vec<(String, String)>>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let computed = compute_form(&form)?;

    let exporter = state.exporter.clone();
    let files = web::block(move || exporter.export(&computed))
        .await?
        .map_err(|e| {
            error!(error = %e, "quotation export failed");
            e
        })?;

    let html = state.pages.render_result(&files)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Serves a generated file as an attachment
pub async fn download(
    path: web::Path<String>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let filename = path.into_inner();
    if !is_plain_file_name(&filename) {
        return Err(ApiError::not_found("File not found"));
    }

    let file_path = state.exporter.output_dir().join(&filename);
    if !file_path.is_file() {
        return Err(ApiError::not_found("File not found"));
    }

    let bytes = tokio::fs::read(&file_path).await?;

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&filename))
        .insert_header(attachment(&filename))
        .body(bytes))
}

pub async fn health(state: web::Data<ApiState>) -> HttpResponse {
    match state.repo.health_check().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "database": "ok"
        })),
        Err(e) => {
            error!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "database": "failed"
            }))
        }
    }
}

fn compute_form(pairs: &[(String, String)]) -> ApiResult<ComputedQuotation> {
    let form = QuotationForm::parse(pairs)?;
    Ok(compute_quotation(form.header, form.rows, form.received))
}

/// A single normal path component, so the join stays inside the output dir.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => XLSX_MIME,
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn attachment(filename: &str) -> ContentDisposition {
    let param = if filename.is_ascii() {
        DispositionParam::Filename(filename.to_string())
    } else {
        DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.as_bytes().to_vec(),
        })
    };

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![param],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_names_are_rejected() {
        assert!(is_plain_file_name("Quotation_Q-1.pdf"));
        assert!(!is_plain_file_name("../secret"));
        assert!(!is_plain_file_name("a/b.pdf"));
        assert!(!is_plain_file_name("a\\b.pdf"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("."));
    }

    #[test]
    fn dots_inside_a_name_are_allowed() {
        assert!(is_plain_file_name("Quotation_v1..xlsx"));
        assert!(is_plain_file_name("Quotation_a..b.pdf"));
        assert!(is_plain_file_name("Quotation_報價.pdf"));
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("Quotation.xlsx"), XLSX_MIME);
        assert_eq!(content_type_for("Quotation.PDF"), "application/pdf");
        assert_eq!(content_type_for("notes.txt"), "application/octet-stream");
    }

    #[test]
    fn non_ascii_names_use_extended_parameter() {
        let ascii = attachment("Quotation_Q-1.pdf").to_string();
        assert!(ascii.starts_with("attachment"));
        assert!(ascii.contains("filename=\"Quotation_Q-1.pdf\""));

        let cjk = attachment("Quotation_報價.pdf").to_string();
        assert!(cjk.contains("filename*=UTF-8''"));
    }
}
