//! Type definitions for streamed function-call fragments.

use serde::{Deserialize, Serialize};

/// One function-call fragment, keyed by its positional index.
///
/// The stable call id usually shows up on one fragment only, and not
/// necessarily the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionChunk {
    pub index: usize,
    pub call_id: Option<String>,
    pub name: String,
    pub arguments: String,
}

impl FunctionChunk {
    /// Create a fragment
    pub fn new(
        index: usize,
        call_id: Option<&str>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            index,
            call_id: call_id.map(str::to_string),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Accumulated name and arguments of one call.
///
/// Arguments are not necessarily valid JSON until the step completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCall {
    pub name: String,
    pub arguments: String,
}

impl PartialCall {
    pub(crate) fn append(&mut self, name: &str, arguments: &str) {
        self.name.push_str(name);
        self.arguments.push_str(arguments);
    }
}
