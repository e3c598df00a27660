//! Wire format for the MySQL API.
//!
//! Every implemented route answers with the same envelope. The transport
//! status of a handled request is always 200; `code` carries the logical
//! outcome (200 success, 500 database failure). Rejections produced before
//! a handler runs (403, 4xx validation) use the envelope too, with `code`
//! equal to the transport status.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product name and version reported by `GET /api`.
pub const API_VERSION: &str = "MySQL API version 1.0.0";

/// `{ "code": 200, "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
}

impl Envelope {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Envelope {
            code,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(200, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_json_shape() {
        let json = serde_json::to_value(Envelope::ok("done")).unwrap();
        assert_eq!(json, serde_json::json!({"code": 200, "message": "done"}));
    }

    #[test]
    fn test_envelope_failure() {
        let envelope = Envelope::failure("boom");
        assert_eq!(envelope.code, 500);
        assert!(!envelope.is_ok());
    }
}
