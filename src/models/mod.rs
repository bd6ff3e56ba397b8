//! Data models for the Freshdesk API.
//!
//! This module contains type definitions for the Freshdesk v2 API, including
//! tickets, conversations, contacts, companies, agents, groups, and shared
//! pagination types. Canned responses and solution articles are passed
//! through as raw JSON.

mod agent;
mod common;
mod contact;
mod conversation;
mod ticket;

pub use agent::*;
pub use common::*;
pub use contact::*;
pub use conversation::*;
pub use ticket::*;
