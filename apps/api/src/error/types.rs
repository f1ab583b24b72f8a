use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    error_code: Option<&'static str>,
}

impl ErrorResponse {
    pub(super) fn new(error: String) -> Self {
        Self {
            error,
            error_code: None,
        }
    }

    /// Creates a payload carrying a machine readable error code.
    pub fn with_code(error: String, error_code: &'static str) -> Self {
        Self {
            error,
            error_code: Some(error_code),
        }
    }
}
