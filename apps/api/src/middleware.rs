use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use webaudit_core::{AppError, AppResult, OwnerId, UserIdentity};

use crate::error::ApiResult;

pub const OWNER_HEADER: &str = "x-audit-owner";
pub const OWNER_NAME_HEADER: &str = "x-audit-owner-name";

/// Identity forwarded by the authenticating gateway, absent for anonymous callers.
#[derive(Debug, Clone, Default)]
pub struct CallerIdentity(pub Option<UserIdentity>);

impl CallerIdentity {
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.0.as_ref()
    }

    pub fn require(&self) -> AppResult<&UserIdentity> {
        self.0
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("an audit owner is required".to_owned()))
    }
}

pub async fn resolve_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;
    request.extensions_mut().insert(CallerIdentity(identity));
    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap) -> AppResult<Option<UserIdentity>> {
    let Some(owner) = header_text(headers, OWNER_HEADER)? else {
        return Ok(None);
    };

    if owner.trim().is_empty() {
        return Ok(None);
    }

    let owner_id = OwnerId::new(owner)?;
    let display_name = header_text(headers, OWNER_NAME_HEADER)?;
    Ok(Some(UserIdentity::new(owner_id, display_name)))
}

fn header_text(headers: &HeaderMap, name: &str) -> AppResult<Option<String>> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(ToOwned::to_owned)
                .map_err(|_| AppError::Validation(format!("header '{name}' is not valid text")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};

    use super::{OWNER_HEADER, OWNER_NAME_HEADER, identity_from_headers};

    #[test]
    fn missing_or_blank_owner_is_anonymous() {
        let headers = HeaderMap::new();
        assert!(matches!(identity_from_headers(&headers), Ok(None)));

        let mut headers = HeaderMap::new();
        headers.insert(OWNER_HEADER, HeaderValue::from_static("  "));
        assert!(matches!(identity_from_headers(&headers), Ok(None)));
    }

    #[test]
    fn owner_and_display_name_are_read() {
        let mut headers = HeaderMap::new();
        headers.insert(OWNER_HEADER, HeaderValue::from_static(" user-7 "));
        headers.insert(OWNER_NAME_HEADER, HeaderValue::from_static("Camille"));

        let identity = identity_from_headers(&headers)
            .unwrap_or_else(|_| unreachable!())
            .unwrap_or_else(|| unreachable!());

        assert_eq!(identity.owner_id().as_str(), "user-7");
        assert_eq!(identity.display_name(), Some("Camille"));
    }

    #[test]
    fn oversized_owner_is_rejected() {
        let mut headers = HeaderMap::new();
        let owner = "x".repeat(200);
        headers.insert(
            OWNER_HEADER,
            HeaderValue::from_str(owner.as_str()).unwrap_or_else(|_| unreachable!()),
        );

        assert!(identity_from_headers(&headers).is_err());
    }
}
