//! Streaming tool-call accumulator.

use super::types::{FunctionChunk, PartialCall};
use crate::error::MalformedEvent;
use crate::events::{BingGroundingDetails, ToolCallDelta};
use crate::registry::{ToolRegistry, BING_GROUNDING, FILE_SEARCH};
use crate::timeline::{Timeline, ToolUpsert};
use crate::tool_message_id;
use std::collections::HashMap;

/// Call id used for single-shot calls that arrive without one.
pub const MISSING_CALL_ID: &str = "noid";

/// Content of a document search bubble.
pub const FILE_SEARCH_PLACEHOLDER: &str = "searching docs...";

/// Reconciles streamed tool-call fragments into one bubble per call.
///
/// Function fragments are keyed by positional index until their call id is
/// known. Indices may be sparse and ids may arrive on any fragment, so
/// buffers live in maps: fragments seen before the id are parked under the
/// index and migrated, in arrival order, into the id-keyed buffer the first
/// time the index resolves.
#[derive(Debug, Default)]
pub struct PartialCallAccumulator {
    call_id_for_index: HashMap<usize, String>,
    by_index: HashMap<usize, PartialCall>,
    by_id: HashMap<String, PartialCall>,
}

impl PartialCallAccumulator {
    /// Create a new accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one function fragment.
    ///
    /// Returns the resolved call id and its accumulated state, or `None`
    /// while the fragment's index has no call id yet.
    pub fn process_chunk(&mut self, chunk: FunctionChunk) -> Option<(&str, &PartialCall)> {
        let FunctionChunk {
            index,
            call_id,
            name,
            arguments,
        } = chunk;

        // First non-empty id wins; an index is never rebound
        if let Some(call_id) = call_id.filter(|id| !id.is_empty()) {
            match self.call_id_for_index.get(&index) {
                None => {
                    self.call_id_for_index.insert(index, call_id);
                }
                Some(bound) if *bound != call_id => {
                    tracing::debug!(index, bound = %bound, ignored = %call_id, "index already bound to a call id");
                }
                Some(_) => {}
            }
        }

        let Some(resolved) = self.call_id_for_index.get(&index).cloned() else {
            self.by_index
                .entry(index)
                .or_default()
                .append(&name, &arguments);
            return None;
        };

        let call = self.by_id.entry(resolved.clone()).or_default();
        if let Some(buffered) = self.by_index.remove(&index) {
            tracing::trace!(index, call_id = %resolved, "migrating buffered fragments");
            call.append(&buffered.name, &buffered.arguments);
        }
        call.append(&name, &arguments);

        self.by_id
            .get_key_value(resolved.as_str())
            .map(|(id, call)| (id.as_str(), call))
    }

    /// Project one tool-call entry onto the timeline.
    ///
    /// Returns whether the timeline changed. A function fragment without an
    /// index is rejected as malformed.
    pub fn upsert_tool_call(
        &mut self,
        call: &ToolCallDelta,
        timeline: &mut Timeline,
        registry: &ToolRegistry,
    ) -> Result<bool, MalformedEvent> {
        match call {
            ToolCallDelta::BingGrounding { bing_grounding, .. } => {
                let Some(query) = bing_grounding
                    .as_ref()
                    .and_then(BingGroundingDetails::query)
                else {
                    return Ok(false);
                };
                let call_id = call.call_id().unwrap_or(MISSING_CALL_ID);
                let outcome =
                    timeline.upsert_tool_message(call_id, registry.title_for(BING_GROUNDING), &query);
                Ok(outcome != ToolUpsert::Frozen)
            }
            ToolCallDelta::FileSearch { .. } => {
                let call_id = call.call_id().unwrap_or(MISSING_CALL_ID);
                if timeline.find_by_id(&tool_message_id(call_id)).is_some() {
                    return Ok(false);
                }
                timeline.upsert_tool_message(
                    call_id,
                    registry.title_for(FILE_SEARCH),
                    FILE_SEARCH_PLACEHOLDER,
                );
                Ok(true)
            }
            ToolCallDelta::Function {
                index,
                id,
                function,
            } => {
                let index = index.ok_or_else(|| MalformedEvent::MissingIndex {
                    call_id: id.clone(),
                })?;
                let function = function.clone().unwrap_or_default();
                let chunk = FunctionChunk {
                    index,
                    call_id: id.clone(),
                    name: function.name.unwrap_or_default(),
                    arguments: function.arguments.unwrap_or_default(),
                };

                let Some((call_id, partial)) = self.process_chunk(chunk) else {
                    return Ok(false);
                };
                // Nothing to show until the name starts arriving
                let name = partial.name.trim();
                if name.is_empty() {
                    return Ok(false);
                }
                let outcome =
                    timeline.upsert_tool_message(call_id, registry.title_for(name), &partial.arguments);
                if outcome == ToolUpsert::Frozen {
                    tracing::debug!(call_id, "ignoring fragment for a finished tool call");
                }
                Ok(outcome != ToolUpsert::Frozen)
            }
            ToolCallDelta::Other => Ok(false),
        }
    }

    /// Call id bound to an index
    pub fn resolved_id(&self, index: usize) -> Option<&str> {
        self.call_id_for_index.get(&index).map(String::as_str)
    }

    /// Fragments parked under an index that has no call id yet
    pub fn buffered(&self, index: usize) -> Option<&PartialCall> {
        self.by_index.get(&index)
    }

    /// Accumulated state of a call
    pub fn call(&self, call_id: &str) -> Option<&PartialCall> {
        self.by_id.get(call_id)
    }

    /// Whether no accumulation state is held
    pub fn is_empty(&self) -> bool {
        self.call_id_for_index.is_empty() && self.by_index.is_empty() && self.by_id.is_empty()
    }

    /// Drop all accumulation state
    pub fn reset(&mut self) {
        self.call_id_for_index.clear();
        self.by_index.clear();
        self.by_id.clear();
    }
}
