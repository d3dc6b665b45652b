use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationLevel {
    Ok,
    Info,
    Warning,
    Error,
}

/// Body returned by the create actions.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub level: NotificationLevel,
    pub module: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(module: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            level: NotificationLevel::Ok,
            module: module.into(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            module: module.into(),
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_has_null_data() {
        let envelope: Envelope<()> =
            Envelope::error("Template", "Couldn't create collection for template");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "level": "ERROR",
                "module": "Template",
                "message": "Couldn't create collection for template",
                "data": null,
            })
        );
    }
}
