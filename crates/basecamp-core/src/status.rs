use crate::normalize::NotificationCount;
use serde::{Deserialize, Serialize};

/// Waybar `class` of the status module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Empty,
    Unread,
    Error,
}

/// Status descriptor read by the Waybar custom module
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub text: String,
    pub alt: String,
    pub tooltip: String,
    pub class: StatusClass,
}

impl StatusRecord {
    /// Map the outcome of a check to the record shown in the bar
    pub fn render<E>(outcome: &Result<NotificationCount, E>) -> Self {
        match outcome {
            Ok(count) => Self::from_count(*count),
            Err(_) => Self::failed(),
        }
    }

    pub fn from_count(count: NotificationCount) -> Self {
        let n = count.to_string();
        let (text, class) = if count.is_zero() {
            (String::new(), StatusClass::Empty)
        } else {
            (n.clone(), StatusClass::Unread)
        };

        Self {
            text,
            tooltip: format!("{} Unread Notifications", n),
            alt: n,
            class,
        }
    }

    pub fn failed() -> Self {
        Self {
            text: "err".to_string(),
            alt: "error".to_string(),
            tooltip: "Check Failed".to_string(),
            class: StatusClass::Error,
        }
    }

    /// Compact JSON, one line
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
