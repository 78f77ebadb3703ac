//! Static task-type → backend table
//!
//! Picks the backend used for the primary (low-latency) call of a chat.

use crate::core::backend::Backend;
use crate::core::task_type::TaskType;

/// Routing table. Adding a task type is a one-row edit.
pub const ROUTES: &[(&str, Backend)] = &[
    ("structured_data_extraction", Backend::Gpt5),
    ("lead_generation", Backend::Gpt5),
    ("summarization", Backend::Claude),
    ("customer_support", Backend::Claude),
    ("research_query", Backend::Mistral),
    ("knowledge_discovery", Backend::Mistral),
];

/// Maps a [`TaskType`] to its preferred [`Backend`].
///
/// Total: labels missing from [`ROUTES`] resolve to the default backend.
#[derive(Debug, Clone, Default)]
pub struct ModelSelector {
    default: Backend,
}

impl ModelSelector {
    /// Selector whose fallback for unknown task types is `default`.
    pub fn new(default: Backend) -> Self {
        Self { default }
    }

    pub fn default_backend(&self) -> &Backend {
        &self.default
    }

    pub fn select(&self, task_type: &TaskType) -> Backend {
        ROUTES
            .iter()
            .find(|(label, _)| *label == task_type.as_str())
            .map(|(_, backend)| backend.clone())
            .unwrap_or_else(|| self.default.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(label: &str) -> Backend {
        ModelSelector::default().select(&TaskType::from(label))
    }

    #[test]
    fn test_documented_routes() {
        assert_eq!(select("lead_generation"), Backend::Gpt5);
        assert_eq!(select("customer_support"), Backend::Claude);
        assert_eq!(select("research_query"), Backend::Mistral);
        assert_eq!(select("summarization"), Backend::Claude);
        assert_eq!(select("knowledge_discovery"), Backend::Mistral);
        assert_eq!(select("structured_data_extraction"), Backend::Gpt5);
    }

    #[test]
    fn test_unknown_label_uses_default() {
        assert_eq!(select("unrecognized_xyz"), Backend::Gpt5);
        assert_eq!(select(""), Backend::Gpt5);
    }

    #[test]
    fn test_configured_default() {
        let selector = ModelSelector::new(Backend::Gemini);
        assert_eq!(selector.select(&"whatever".into()), Backend::Gemini);
        // table entries win over the default
        assert_eq!(selector.select(&"customer_support".into()), Backend::Claude);
    }

    #[test]
    fn test_select_is_deterministic() {
        let selector = ModelSelector::default();
        for (label, _) in ROUTES {
            let task = TaskType::from(*label);
            assert_eq!(selector.select(&task), selector.select(&task));
        }
        let unknown = TaskType::from("something_else");
        assert_eq!(selector.select(&unknown), selector.select(&unknown));
    }
}
