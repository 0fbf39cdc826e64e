//! Classification of a single probe reply. The raw reply is decoded
//! once here; everything downstream matches on [`RpcOutcome`].
use serde::Deserialize;
use serde_json::Value;

use super::client::{Exchange, ProbeError};

#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome {
    /// Whole decoded body, no schema applied.
    Success(Value),
    RpcError {
        code: Option<i64>,
        message: String,
    },
    TransportFailure(String),
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    code: Option<i64>,
    message: Option<String>,
}

impl RpcOutcome {
    /// A top-level `error` key wins over the HTTP status. Without one, a
    /// non-2xx status still fails the probe.
    pub fn from_exchange(exchange: &Exchange) -> Self {
        if let Some(err) = exchange.body.get("error") {
            return Self::from_error_value(err);
        }
        if !(200..300).contains(&exchange.status) {
            return Self::TransportFailure(format!("HTTP status {}", exchange.status));
        }
        Self::Success(exchange.body.clone())
    }

    pub fn from_result(res: Result<Exchange, ProbeError>) -> Self {
        match res {
            Ok(exchange) => Self::from_exchange(&exchange),
            Err(e) => Self::TransportFailure(e.to_string()),
        }
    }

    fn from_error_value(err: &Value) -> Self {
        match err {
            Value::String(s) => Self::RpcError {
                code: None,
                message: s.clone(),
            },
            Value::Object(_) => {
                let parsed: Option<ErrorObject> = serde_json::from_value(err.clone()).ok();
                match parsed {
                    Some(ErrorObject {
                        code,
                        message: Some(message),
                    }) => Self::RpcError { code, message },
                    Some(ErrorObject {
                        code,
                        message: None,
                    }) => Self::RpcError {
                        code,
                        message: err.to_string(),
                    },
                    None => Self::RpcError {
                        code: None,
                        message: err.to_string(),
                    },
                }
            }
            other => Self::RpcError {
                code: None,
                message: other.to_string(),
            },
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Text shown under a failed summary line.
    pub fn error_text(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::RpcError {
                code: Some(code),
                message,
            } => Some(format!("{message} (code {code})")),
            Self::RpcError {
                code: None,
                message,
            } => Some(message.clone()),
            Self::TransportFailure(desc) => Some(desc.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ex(status: u16, body: Value) -> Exchange {
        Exchange { status, body }
    }

    #[test]
    fn result_body_is_success() {
        let body = json!({"result": {"value": {"amount": "123"}}});
        let o = RpcOutcome::from_exchange(&ex(200, body.clone()));
        assert_eq!(o, RpcOutcome::Success(body));
        assert!(o.passed());
        assert_eq!(o.error_text(), None);
    }

    #[test]
    fn error_object_is_decoded() {
        let o = RpcOutcome::from_exchange(&ex(
            200,
            json!({"error": {"code": -1, "message": "not found"}}),
        ));
        assert_eq!(
            o,
            RpcOutcome::RpcError {
                code: Some(-1),
                message: "not found".into()
            }
        );
        assert_eq!(o.error_text().unwrap(), "not found (code -1)");
    }

    #[test]
    fn error_key_wins_over_bad_status() {
        let o = RpcOutcome::from_exchange(&ex(
            429,
            json!({"error": {"code": 429, "message": "rate limited"}}),
        ));
        assert!(matches!(o, RpcOutcome::RpcError { code: Some(429), .. }));
    }

    #[test]
    fn string_or_odd_error_values_still_fail() {
        let o = RpcOutcome::from_exchange(&ex(200, json!({"error": "boom"})));
        assert_eq!(o.error_text().unwrap(), "boom");

        let o = RpcOutcome::from_exchange(&ex(200, json!({"error": {"detail": 1}})));
        assert!(!o.passed());
        assert!(o.error_text().unwrap().contains("detail"));

        let o = RpcOutcome::from_exchange(&ex(200, json!({"error": null})));
        assert!(!o.passed());
    }

    #[test]
    fn non_success_status_without_error_key_fails() {
        let o = RpcOutcome::from_exchange(&ex(503, json!({"result": "ok"})));
        assert_eq!(o, RpcOutcome::TransportFailure("HTTP status 503".into()));
    }

    #[test]
    fn transport_errors_become_failures() {
        let o = RpcOutcome::from_result(Err(ProbeError::Timeout));
        assert!(matches!(o, RpcOutcome::TransportFailure(ref s) if s.contains("timed out")));
    }
}
