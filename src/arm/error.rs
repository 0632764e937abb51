//! Error type shared by the management and directory API clients.

/// A failed API call.
///
/// Status errors keep the decoded cloud error code so callers can react to
/// specific conditions (404 during deletion polling, name conflicts).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => decode_api_error(status, response),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Unwrap the `{"error":{"code","message"}}` payload both APIs use.
/// Falls back to the raw body when the payload is not in that shape.
pub(crate) fn decode_api_error(status: u16, response: ureq::Response) -> ApiError {
    let body = response.into_string().unwrap_or_default();
    let body = body.trim();

    if body.is_empty() {
        return ApiError::Api {
            status,
            code: "http_error".to_string(),
            message: format!("HTTP {status}"),
        };
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiError::Api {
            status,
            code: "http_error".to_string(),
            message: body.to_string(),
        };
    };

    let error = value.get("error").unwrap_or(&value);
    let code = error
        .get("code")
        .and_then(|v| v.as_str())
        .unwrap_or("http_error")
        .to_string();
    let message = error
        .get("message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| body.to_string());

    ApiError::Api {
        status,
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_only_matches_404() {
        let err = ApiError::Api {
            status: 404,
            code: "ResourceGroupNotFound".into(),
            message: "gone".into(),
        };
        assert!(err.is_not_found());

        let err = ApiError::Api {
            status: 409,
            code: "Conflict".into(),
            message: "busy".into(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(409));

        assert!(!ApiError::Transport("timeout".into()).is_not_found());
    }
}
