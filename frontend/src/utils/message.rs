use crate::api::ApiError;
use serde_json::Value;

/// Flattens REST framework field errors (`{"field": ["msg"]}`) into lines.
pub fn field_error_lines(details: &Value) -> Vec<String> {
    let Some(fields) = details.as_object() else {
        return Vec::new();
    };
    fields
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "error" | "detail"))
        .flat_map(|(key, value)| {
            let messages: Vec<String> = match value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                Value::String(text) => vec![text.clone()],
                _ => Vec::new(),
            };
            messages
                .into_iter()
                .map(move |msg| format!("{}: {}", key, msg))
        })
        .collect()
}

/// Banner shown above a form or list after an action finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
    }

    pub fn set_error(&mut self, err: ApiError) {
        self.error = Some(err);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    /// The error message followed by any per-field details.
    pub fn error_lines(&self) -> Vec<String> {
        let Some(err) = &self.error else {
            return Vec::new();
        };
        let mut lines = vec![err.to_string()];
        if let Some(details) = err.details() {
            lines.extend(field_error_lines(details));
        }
        lines
    }

    /// Records `result`, using `success` for the happy path.
    pub fn apply<T>(&mut self, result: &Result<T, ApiError>, success: &str) {
        match result {
            Ok(_) => self.set_success(success),
            Err(err) => self.set_error(err.clone()),
        }
    }
}
