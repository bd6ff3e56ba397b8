//! MCP tool inputs for the Freshdesk server.
//!
//! This module contains the input types and validation helpers for
//! MCP tools that expose Freshdesk operations.

mod inputs;

pub use inputs::*;
