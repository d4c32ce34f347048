//! Tool-call fragments carried by run steps

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// One tool-call entry of a run step or run step delta.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolCallDelta {
    /// Web search call whose request URL already holds the full query
    BingGrounding {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        bing_grounding: Option<BingGroundingDetails>,
    },
    /// Document search call with no incrementally revealed payload
    FileSearch {
        #[serde(default)]
        id: Option<String>,
    },
    /// Function call streamed as name/argument fragments
    Function {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        function: Option<FunctionDelta>,
    },
    /// Tool types without a bubble
    #[serde(other)]
    Other,
}

impl ToolCallDelta {
    /// Call id carried by this fragment, if present and non-empty
    pub fn call_id(&self) -> Option<&str> {
        let id = match self {
            Self::BingGrounding { id, .. } | Self::FileSearch { id } | Self::Function { id, .. } => {
                id.as_deref()
            }
            Self::Other => None,
        };
        id.filter(|id| !id.is_empty())
    }
}

/// Request descriptor of a web search call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BingGroundingDetails {
    #[serde(default, alias = "request_url")]
    pub requesturl: Option<String>,
}

impl BingGroundingDetails {
    /// The search query, or `None` when the descriptor is blank
    pub fn query(&self) -> Option<String> {
        let url = self.requesturl.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let query = extract_search_query(url);
        (!query.trim().is_empty()).then(|| query.to_string())
    }
}

static QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"q="([^"]+)""#).expect("hardcoded regex"));

/// Extract the quoted `q="..."` value from a search request URL.
///
/// Returns the whole URL when it has no quoted query.
pub fn extract_search_query(request_url: &str) -> &str {
    QUERY
        .captures(request_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(request_url)
}

/// Name/argument fragment of a function call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}
