use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use webaudit_domain::AuditId;

use crate::dto::{AuditRecordResponse, CreateAuditRequest};
use crate::error::ApiResult;
use crate::middleware::CallerIdentity;
use crate::state::AppState;

pub async fn create_audit_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(payload): Json<CreateAuditRequest>,
) -> ApiResult<(StatusCode, Json<AuditRecordResponse>)> {
    let audit = state
        .audit_service
        .create_audit(caller.identity(), payload.url.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(AuditRecordResponse::from(audit))))
}

pub async fn list_audits_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> ApiResult<Json<Vec<AuditRecordResponse>>> {
    let audits = state
        .audit_service
        .list_audits(caller.require()?)
        .await?
        .into_iter()
        .map(AuditRecordResponse::from)
        .collect();

    Ok(Json(audits))
}

pub async fn get_audit_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(audit_id): Path<String>,
) -> ApiResult<Json<AuditRecordResponse>> {
    let audit_id = AuditId::parse(audit_id.as_str())?;
    let audit = state
        .audit_service
        .get_audit(caller.identity(), audit_id)
        .await?;

    Ok(Json(AuditRecordResponse::from(audit)))
}

pub async fn audit_report_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(audit_id): Path<String>,
) -> ApiResult<Response> {
    let audit_id = AuditId::parse(audit_id.as_str())?;
    let report = state
        .audit_service
        .render_report(caller.identity(), audit_id)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report.content_type.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name),
            ),
        ],
        report.bytes,
    )
        .into_response())
}
