//! Task type value object

use serde::{Deserialize, Serialize};

/// Semantic label describing what a query is for (Value Object)
///
/// Open-ended: any label is accepted and used only as a routing key for
/// [`ModelSelector`](crate::routing::ModelSelector).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskType(String);

impl TaskType {
    /// Label used when the caller does not supply one
    pub const DEFAULT: &'static str = "research_query";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskType {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        TaskType::new(s)
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        TaskType(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_research_query() {
        assert_eq!(TaskType::default().as_str(), "research_query");
    }

    #[test]
    fn test_any_label_is_accepted() {
        let task: TaskType = "unrecognized_xyz".into();
        assert_eq!(task.to_string(), "unrecognized_xyz");
    }
}
