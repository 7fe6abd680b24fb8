use serde::Serialize;

/// Minimal acknowledgment body for mutations with nothing else to return
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
