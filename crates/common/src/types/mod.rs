use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Outcome marker carried by every JSON response body.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Fail,
}

/// Failure envelope: `{"status": "fail", "message": ...}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FailBody {
    pub status: EnvelopeStatus,
    pub message: String,
}

impl FailBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: EnvelopeStatus::Fail, message: message.into() }
    }
}

/// Success envelope: `{"status": "success", "data": ...}` plus optional
/// list counters, an auth token, or a human readable message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuccessBody<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessBody<T> {
    pub fn data(data: T) -> Self {
        Self { status: EnvelopeStatus::Success, token: None, length: None, total: None, message: None, data: Some(data) }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_counts(mut self, length: usize, total: usize) -> Self {
        self.length = Some(length);
        self.total = Some(total);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fail_body_shape() {
        let v = serde_json::to_value(FailBody::new("Product Not Found")).unwrap();
        assert_eq!(v, json!({"status": "fail", "message": "Product Not Found"}));
    }

    #[test]
    fn success_body_omits_unset_fields() {
        let v = serde_json::to_value(SuccessBody::data(json!({"task": {"id": 1}}))).unwrap();
        assert_eq!(v, json!({"status": "success", "data": {"task": {"id": 1}}}));

        let v = serde_json::to_value(SuccessBody::data(json!([])).with_counts(0, 12)).unwrap();
        assert_eq!(v["length"], 0);
        assert_eq!(v["total"], 12);
    }
}
