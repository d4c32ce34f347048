//! Tool-call accumulation for streamed run steps.
//!
//! Single-shot calls (web search, document search) become a bubble as soon
//! as they are seen. Function calls arrive as name/argument fragments keyed
//! by a transient index and are accumulated until their name is known.

mod accumulator;
mod types;

pub use accumulator::{PartialCallAccumulator, FILE_SEARCH_PLACEHOLDER, MISSING_CALL_ID};
pub use types::{FunctionChunk, PartialCall};
