//! Agent system for YouTube exploration with tool calling.
//!
//! Provides an LLM agent that answers tasks by calling YouTube Data API
//! tools: search, channel and video lookups, uploads listings, transcripts,
//! and hyperlink construction.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, SearchArgs, ToolCall, ToolContext};
