//! Tool label registry.
//!
//! Maps a tool-call kind (a function name such as `fetch_weather`, or a
//! built-in tool type such as `bing_grounding`) to the title shown on its
//! bubble. Built once, then shared read-only between turns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-facing label for one tool kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLabel {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Registry of tool labels keyed by tool kind.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolLabel>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the built-in tool labels
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (kind, title, description) in DEFAULT_LABELS {
            registry.register(*kind, *title, *description);
        }
        registry
    }

    /// Register or replace the label for a tool kind
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.tools.insert(
            kind.into(),
            ToolLabel {
                title: title.into(),
                description: description.into(),
            },
        );
        self
    }

    /// Title for a tool kind, falling back to `calling {kind}`
    pub fn title_for(&self, kind: &str) -> String {
        match self.tools.get(kind) {
            Some(label) => label.title.clone(),
            None => format!("calling {kind}"),
        }
    }

    /// Longer description for a tool kind, or empty when unregistered
    pub fn description_for(&self, kind: &str) -> &str {
        self.tools
            .get(kind)
            .map(|label| label.description.as_str())
            .unwrap_or("")
    }

    /// Label registered for a tool kind
    pub fn get(&self, kind: &str) -> Option<&ToolLabel> {
        self.tools.get(kind)
    }

    /// Whether a kind has a registered label
    pub fn contains(&self, kind: &str) -> bool {
        self.tools.contains_key(kind)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Tool kind of the single-shot web search call.
pub const BING_GROUNDING: &str = "bing_grounding";

/// Tool kind of the single-shot document search call.
pub const FILE_SEARCH: &str = "file_search";

const DEFAULT_LABELS: &[(&str, &str, &str)] = &[
    ("fetch_weather", "☁️ fetching weather", "Looks up the current weather."),
    ("fetch_datetime", "🕒 fetching datetime", "Reads the current date and time."),
    ("fetch_stock_price", "📈 fetching financial info", "Looks up a stock price."),
    ("send_email", "✉️ sending mail", "Sends an email on the user's behalf."),
    (FILE_SEARCH, "📄 searching docs", "Searches documents in connected file stores."),
    (BING_GROUNDING, "🔍 searching bing", "Leverages Bing to retrieve real-time public data."),
    ("azure_ai_search", "🔎 enterprise search", "Queries an Azure Cognitive Search index for internal data."),
    ("sharepoint_search", "📂 sharepoint docs", "Retrieves documents stored in SharePoint."),
    ("fabric_data", "🔧 fabric data", "Retrieves and analyzes data from Microsoft Fabric."),
];

#[cfg(test)]
mod tests;
