use serde::{Deserialize, Serialize};

/// Body of a result-access check, exactly as the frontend sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResultRequest {
    pub student_id: String,
    pub pin: String,
}

/// Envelope returned for every check outcome. `student_id` echoes the
/// caller-supplied value (possibly empty) whether or not the check passed;
/// `error` is only present on failure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResultResponse {
    pub success: bool,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
