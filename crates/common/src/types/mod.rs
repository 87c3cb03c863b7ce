use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement body returned by successful mutations:
/// `{"Response": {"Success": "<message>"}}`.
#[derive(Serialize, Debug, PartialEq)]
pub struct SuccessResponse {
    #[serde(rename = "Response")]
    pub response: SuccessMessage,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SuccessMessage {
    #[serde(rename = "Success")]
    pub success: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { response: SuccessMessage { success: message.into() } }
    }
}
