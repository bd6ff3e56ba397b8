//! Search query construction for the Freshdesk ticket search grammar.
//!
//! Freshdesk's `/search/tickets` endpoint takes a single `query` parameter
//! written in its own filter language: `field:value` tokens joined with
//! `AND` / `OR` and grouped with parentheses, e.g.
//! `(status:2 AND priority:3) OR tag:'urgent'`.
//!
//! This module turns structured conditions into that text:
//!
//! - [`format_condition`] renders one [`Condition`] into a token
//! - [`compose`] joins already rendered parts
//! - [`build_search_query`] formats and joins a flat condition list
//! - [`compose_groups`] formats [`ConditionGroup`]s and joins them
//! - [`normalize_search_query`] prepares the final string for submission
//!
//! Parentheses only appear where two or more siblings are joined, so a
//! single condition or a single group is never wrapped.
//!
//! ```
//! use freshdesk_mcp::query::{build_search_query, BoolOperator, Condition};
//!
//! let query = build_search_query(
//!     &[
//!         Condition::new("status", 2),
//!         Condition::new("priority", 3).with_operator(">="),
//!     ],
//!     BoolOperator::And,
//! )
//! .unwrap();
//! assert_eq!(query, "(status:2 AND priority:>3)");
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::error::FreshdeskError;

/// Standard ticket fields accepted by the search grammar.
///
/// Custom fields are accepted separately through the `cf_` prefix.
pub const SEARCHABLE_FIELDS: &[&str] = &[
    "tag",
    "status",
    "priority",
    "type",
    "agent_id",
    "group_id",
    "company_id",
    "created_at",
    "updated_at",
    "due_by",
    "fr_due_by",
];

/// Prefix Freshdesk uses for custom ticket fields.
pub const CUSTOM_FIELD_PREFIX: &str = "cf_";

/// A value on the right-hand side of a search condition.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    /// Matches an empty field; rendered as `null`.
    Null,
    /// Rendered in single quotes.
    String(String),
    /// Rendered bare.
    Number(Number),
    /// Rendered as lowercase `true` / `false`.
    Bool(bool),
}

impl fmt::Display for SearchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchValue::Null => f.write_str("null"),
            SearchValue::String(s) => write!(f, "'{}'", s),
            SearchValue::Number(n) => write!(f, "{}", n),
            SearchValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

impl TryFrom<Value> for SearchValue {
    type Error = FreshdeskError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(SearchValue::Null),
            Value::String(s) => Ok(SearchValue::String(s)),
            Value::Number(n) => Ok(SearchValue::Number(n)),
            Value::Bool(b) => Ok(SearchValue::Bool(b)),
            Value::Array(_) => Err(FreshdeskError::UnsupportedValueType(
                "array (expected null, string, number or boolean)".to_string(),
            )),
            Value::Object(_) => Err(FreshdeskError::UnsupportedValueType(
                "object (expected null, string, number or boolean)".to_string(),
            )),
        }
    }
}

impl From<&str> for SearchValue {
    fn from(value: &str) -> Self {
        SearchValue::String(value.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(value: String) -> Self {
        SearchValue::String(value)
    }
}

impl From<i64> for SearchValue {
    fn from(value: i64) -> Self {
        SearchValue::Number(value.into())
    }
}

impl From<i32> for SearchValue {
    fn from(value: i32) -> Self {
        SearchValue::Number(value.into())
    }
}

impl From<u64> for SearchValue {
    fn from(value: u64) -> Self {
        SearchValue::Number(value.into())
    }
}

impl From<bool> for SearchValue {
    fn from(value: bool) -> Self {
        SearchValue::Bool(value)
    }
}

impl<T: Into<SearchValue>> From<Option<T>> for SearchValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SearchValue::Null, Into::into)
    }
}

/// Comparison applied between a field and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparator {
    /// `field:value`
    #[default]
    Equal,
    /// `field:>value` (Freshdesk treats this as "greater than or equal").
    Greater,
    /// `field:<value` (Freshdesk treats this as "less than or equal").
    Less,
}

impl Comparator {
    /// Parses an operator spelling, falling back to equality.
    ///
    /// `>`, `>=` and `:>` map to [`Comparator::Greater`]; `<`, `<=` and `:<`
    /// map to [`Comparator::Less`]. Anything else, including `=` and no
    /// operator at all, is [`Comparator::Equal`].
    pub fn parse(operator: Option<&str>) -> Self {
        match operator.map(str::trim) {
            Some(">") | Some(">=") | Some(":>") => Comparator::Greater,
            Some("<") | Some("<=") | Some(":<") => Comparator::Less,
            _ => Comparator::Equal,
        }
    }

    /// The marker placed between field name and value.
    pub fn marker(self) -> &'static str {
        match self {
            Comparator::Equal => ":",
            Comparator::Greater => ":>",
            Comparator::Less => ":<",
        }
    }
}

/// Boolean operator joining conditions or groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolOperator {
    /// `AND`
    #[default]
    And,
    /// `OR`
    Or,
}

impl BoolOperator {
    /// The literal used in the query text.
    pub fn as_str(self) -> &'static str {
        match self {
            BoolOperator::And => "AND",
            BoolOperator::Or => "OR",
        }
    }
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoolOperator {
    type Err = FreshdeskError;

    /// Accepts exactly `AND` or `OR`; the match is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(BoolOperator::And),
            "OR" => Ok(BoolOperator::Or),
            other => Err(FreshdeskError::validation(format!(
                "unsupported operator {:?}: expected \"AND\" or \"OR\"",
                other
            ))),
        }
    }
}

/// One field/value/comparator triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field name; must be searchable (see [`validate_field`]).
    pub field: String,
    /// Value to match.
    pub value: SearchValue,
    /// Comparison to apply.
    pub comparator: Comparator,
}

impl Condition {
    /// Creates an equality condition.
    pub fn new(field: impl Into<String>, value: impl Into<SearchValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            comparator: Comparator::Equal,
        }
    }

    /// Sets the comparator from an operator spelling such as `>=` or `:<`.
    pub fn with_operator(mut self, operator: &str) -> Self {
        self.comparator = Comparator::parse(Some(operator));
        self
    }

    /// Sets the comparator directly.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }
}

/// Conditions joined by a single operator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionGroup {
    /// Conditions in rendering order.
    pub conditions: Vec<Condition>,
    /// Operator placed between the conditions.
    pub operator: BoolOperator,
}

impl ConditionGroup {
    /// Creates a group from its conditions and operator.
    pub fn new(conditions: Vec<Condition>, operator: BoolOperator) -> Self {
        Self {
            conditions,
            operator,
        }
    }
}

/// Checks that a field can be searched on.
///
/// # Errors
///
/// Returns `FreshdeskError::Validation` unless the field is one of
/// [`SEARCHABLE_FIELDS`] or a well-formed `cf_` custom field.
pub fn validate_field(field: &str) -> Result<(), FreshdeskError> {
    if SEARCHABLE_FIELDS.contains(&field) {
        return Ok(());
    }

    if let Some(name) = field.strip_prefix(CUSTOM_FIELD_PREFIX) {
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Ok(());
        }
    }

    Err(FreshdeskError::validation(format!(
        "unsupported search field {:?}: expected one of {} or a custom field prefixed with '{}'",
        field.chars().take(50).collect::<String>(),
        SEARCHABLE_FIELDS.join(", "),
        CUSTOM_FIELD_PREFIX
    )))
}

/// Renders a single condition as a search token.
///
/// Null values render as `field:null` whatever the comparator.
///
/// # Errors
///
/// Returns `FreshdeskError::Validation` if the field is not searchable.
pub fn format_condition(condition: &Condition) -> Result<String, FreshdeskError> {
    validate_field(&condition.field)?;

    let marker = match condition.value {
        SearchValue::Null => Comparator::Equal.marker(),
        _ => condition.comparator.marker(),
    };

    Ok(format!("{}{}{}", condition.field, marker, condition.value))
}

/// Joins already rendered parts with an operator.
///
/// One part is returned unchanged, two or more are wrapped in parentheses,
/// and no parts yield an empty string.
pub fn compose<S: AsRef<str>>(parts: &[S], operator: BoolOperator) -> String {
    match parts {
        [] => String::new(),
        [single] => single.as_ref().to_string(),
        _ => {
            let separator = format!(" {} ", operator);
            let joined = parts
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(&separator);
            format!("({})", joined)
        }
    }
}

/// Formats every condition and joins them with `operator`.
///
/// # Errors
///
/// Fails on the first condition whose field is not searchable.
pub fn build_search_query(
    conditions: &[Condition],
    operator: BoolOperator,
) -> Result<String, FreshdeskError> {
    let parts = conditions
        .iter()
        .map(format_condition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(compose(&parts, operator))
}

/// Formats each group with its own operator, then joins the groups.
///
/// Groups without conditions are dropped before joining, so they never leave
/// empty parentheses or a dangling operator behind.
///
/// # Errors
///
/// Fails on the first condition whose field is not searchable.
pub fn compose_groups(
    groups: &[ConditionGroup],
    operator: BoolOperator,
) -> Result<String, FreshdeskError> {
    let mut rendered = Vec::with_capacity(groups.len());

    for group in groups {
        if group.conditions.is_empty() {
            continue;
        }
        rendered.push(build_search_query(&group.conditions, group.operator)?);
    }

    Ok(compose(&rendered, operator))
}

/// Prepares a query string for the `query` parameter of the search endpoint.
///
/// Text without a `:` is treated as free text and rewritten to match either
/// the description or the subject. The result is then wrapped in double
/// quotes unless it already starts and ends with one.
///
/// Embedded quotes are passed through unescaped.
pub fn normalize_search_query(input: &str) -> String {
    let query = if input.contains(':') {
        input.to_string()
    } else {
        let text = SearchValue::from(input);
        format!("(description:{} OR subject:{})", text, text)
    };

    if query.len() >= 2 && query.starts_with('"') && query.ends_with('"') {
        query
    } else {
        format!("\"{}\"", query)
    }
}
