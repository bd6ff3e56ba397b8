//! Agent and group models for the Freshdesk API.

use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// Which tickets an agent can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTicketScope {
    /// 1: every ticket
    GlobalAccess,
    /// 2: tickets in the agent's groups
    GroupAccess,
    /// 3: only tickets assigned to the agent
    RestrictedAccess,
}

impl AgentTicketScope {
    /// Looks up a scope by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::GlobalAccess),
            2 => Some(Self::GroupAccess),
            3 => Some(Self::RestrictedAccess),
            _ => None,
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        match self {
            Self::GlobalAccess => 1,
            Self::GroupAccess => 2,
            Self::RestrictedAccess => 3,
        }
    }
}

/// Contact details embedded in an agent record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AgentContact {
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
}

/// A helpdesk agent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Agent {
    /// Unique agent ID.
    pub id: u64,

    /// Contact details.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: AgentContact,

    /// Whether the agent is an occasional (day pass) agent.
    #[serde(default)]
    pub occasional: Option<bool>,

    /// 1 = global, 2 = group, 3 = restricted access.
    #[serde(default)]
    pub ticket_scope: Option<u8>,

    /// Whether the agent is currently available for assignment.
    #[serde(default)]
    pub available: Option<bool>,

    /// Groups the agent belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_ids: Vec<u64>,
}

impl Agent {
    /// Returns the agent's name, falling back to email, then the ID.
    pub fn display_name(&self) -> String {
        self.contact
            .name
            .clone()
            .or_else(|| self.contact.email.clone())
            .unwrap_or_else(|| format!("agent {}", self.id))
    }
}

/// A result from `/agents/autocomplete`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentMatch {
    /// Agent ID.
    pub id: u64,
    /// Agent name.
    #[serde(default)]
    pub name: Option<String>,
    /// Agent email.
    #[serde(default)]
    pub email: Option<String>,
}

/// A group of agents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Group {
    /// Unique group ID.
    pub id: u64,

    /// Group name.
    pub name: String,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Members of the group.
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent_ids: Vec<u64>,
}
