use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, warn};

use super::error::{ApiError, ApiResult};
use super::state::ApiState;
use crate::models::{SaveQuotationRequest, SaveQuotationResponse};
use crate::store::StoreError;

/// List saved quotations, newest date first
pub async fn list_quotations(state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let quotations = state.repo.list().await?;
    Ok(HttpResponse::Ok().json(quotations))
}

/// Create or update a quotation
pub async fn save_quotation(
    body: web::Json<SaveQuotationRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let target = request.target_id();

    match state.repo.save(request).await {
        Ok(id) => {
            info!(id, updated = target.is_some(), "quotation saved");
            Ok(HttpResponse::Ok().json(SaveQuotationResponse {
                success: true,
                id,
                message: "Quotation saved successfully".to_string(),
            }))
        }
        Err(StoreError::NotFound(id)) => {
            warn!(id, "save targeted a missing quotation");
            Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Quotation not found"
            })))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_quotation(
    path: web::Path<i64>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    match state.repo.get(id).await? {
        Some(quotation) => Ok(HttpResponse::Ok().json(quotation)),
        None => Err(ApiError::not_found("Quotation not found")),
    }
}

pub async fn delete_quotation(
    path: web::Path<i64>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state.repo.delete(id).await?;
    info!(id, "quotation deleted");

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
