use serde::Serialize;
use ts_rs::TS;
use webaudit_core::AppError;

/// Error body returned by every failing audit endpoint.
///
/// `code` is stable so clients can tell an exhausted performance-test quota
/// apart from other failures without parsing `message`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-error-response.ts"
)]
pub struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl ErrorResponse {
    pub(super) fn from_app_error(error: &AppError) -> Self {
        let code = match error {
            AppError::Validation(_) => "invalid_request",
            AppError::Unauthorized(_) => "owner_required",
            AppError::InsufficientCredits(_) => "insufficient_credits",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal",
        };

        Self {
            code,
            message: error.to_string(),
        }
    }
}
