//! Contact and company models for the Freshdesk API.

use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// A customer contact.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contact {
    /// Unique contact ID.
    pub id: u64,

    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Company the contact belongs to.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,

    /// Whether the contact has verified their account.
    #[serde(default)]
    pub active: Option<bool>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Contact {
    /// Returns the name, falling back to email, then the ID.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("contact {}", self.id))
    }
}

/// A customer company.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Company {
    /// Unique company ID.
    pub id: u64,

    /// Company name.
    pub name: String,

    /// Short description.
    #[serde(default)]
    pub description: Option<String>,

    /// Email domains mapped to this company.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<String>,

    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response body of `/companies/autocomplete`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyMatches {
    /// Matching companies (id and name only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub companies: Vec<CompanyMatch>,
}

/// One autocomplete hit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyMatch {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
}
