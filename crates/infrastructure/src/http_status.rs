use reqwest::StatusCode;
use webaudit_application::{AuditError, AuditErrorKind};

/// Maps a non-success provider response to an audit error.
pub(crate) fn classify_status(provider: &str, status: StatusCode, body: &str) -> AuditError {
    let kind = match status {
        StatusCode::PAYMENT_REQUIRED => AuditErrorKind::QuotaExceeded,
        StatusCode::TOO_MANY_REQUESTS => AuditErrorKind::RateLimited,
        _ => AuditErrorKind::UpstreamError,
    };

    AuditError::new(
        kind,
        format!("{provider} answered with status {status}: {}", truncate(body)),
    )
}

/// Maps a transport failure to an audit error.
pub(crate) fn classify_transport(provider: &str, error: &reqwest::Error) -> AuditError {
    if error.is_timeout() {
        return AuditError::timeout(format!("{provider} request timed out: {error}"));
    }

    if error.is_decode() {
        return AuditError::upstream(format!("{provider} returned an undecodable payload: {error}"));
    }

    AuditError::upstream(format!("{provider} request failed: {error}"))
}

/// Masks all but the first and last two characters of a secret for logs.
pub(crate) fn mask_secret(secret: &str) -> String {
    let characters: Vec<char> = secret.chars().collect();
    if characters.len() <= 5 {
        return "*".repeat(characters.len());
    }

    let head: String = characters[..2].iter().collect();
    let tail: String = characters[characters.len() - 2..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(characters.len() - 4))
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use webaudit_application::AuditErrorKind;

    use super::{classify_status, mask_secret};

    #[test]
    fn statuses_map_to_audit_error_kinds() {
        let cases = [
            (StatusCode::PAYMENT_REQUIRED, AuditErrorKind::QuotaExceeded),
            (StatusCode::TOO_MANY_REQUESTS, AuditErrorKind::RateLimited),
            (StatusCode::GATEWAY_TIMEOUT, AuditErrorKind::UpstreamError),
            (StatusCode::INTERNAL_SERVER_ERROR, AuditErrorKind::UpstreamError),
            (StatusCode::NOT_FOUND, AuditErrorKind::UpstreamError),
        ];

        for (status, kind) in cases {
            assert_eq!(classify_status("provider", status, "").kind, kind);
        }
    }

    #[test]
    fn long_bodies_are_truncated_in_messages() {
        let body = "x".repeat(1_000);
        let error = classify_status("provider", StatusCode::BAD_GATEWAY, body.as_str());
        assert!(error.message.len() < 300);
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(mask_secret("abcdefgh"), "ab****gh");
        assert_eq!(mask_secret("abc"), "***");
    }
}
