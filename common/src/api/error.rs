use serde::{Deserialize, Serialize};

/// One entry of a structured validation error array (`errors: [{msg}]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorBody {
    #[serde(default, alias = "message")]
    pub msg: String,
    #[serde(default, alias = "param", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldErrorBody>,
}

/// Failure of a single gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// 401: the session token was cleared and the user sent to the login route.
    #[error("session expired")]
    Unauthorized,
    #[error("request failed with status {status}")]
    Http {
        status: u16,
        body: Option<ApiErrorBody>,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiFailure {
    /// Message shown to the user: the structured validation messages when
    /// present, else the server `message`, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        let ApiFailure::Http {
            body: Some(body), ..
        } = self
        else {
            return fallback.to_string();
        };

        let messages: Vec<&str> = body
            .errors
            .iter()
            .map(|e| e.msg.trim())
            .filter(|m| !m.is_empty())
            .collect();
        if !messages.is_empty() {
            return messages.join(", ");
        }

        match body.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiFailure::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(body: serde_json::Value) -> ApiFailure {
        ApiFailure::Http {
            status: 400,
            body: Some(serde_json::from_value(body).unwrap()),
        }
    }

    #[test]
    fn validation_array_wins_over_message() {
        let failure = http(json!({
            "message": "Validation failed",
            "errors": [{"msg": "Name taken"}, {"msg": "Email invalid", "param": "email"}]
        }));
        assert_eq!(failure.user_message("fallback"), "Name taken, Email invalid");
    }

    #[test]
    fn message_used_when_no_errors() {
        let failure = http(json!({"message": "Duplicate acronym"}));
        assert_eq!(failure.user_message("fallback"), "Duplicate acronym");
    }

    #[test]
    fn fallback_for_empty_bodies_and_transport_errors() {
        assert_eq!(http(json!({})).user_message("Try again"), "Try again");
        assert_eq!(
            ApiFailure::Network("offline".into()).user_message("Try again"),
            "Try again"
        );
        assert_eq!(
            ApiFailure::Http { status: 500, body: None }.user_message("Try again"),
            "Try again"
        );
    }
}
