//! Request and response types for the query entry point.
//!
//! A request carries a query string and an [`Action`]. Validation responses
//! are a JSON object keyed by input code; suggestion responses list ranked
//! candidates.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::suggestion::Suggestion;
use crate::validation::ValidationResult;

static ACTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)action:\s*(\S+)([^\n\r]*)").unwrap());
static QUERY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)query:\s*([^\n\r]+)").unwrap());
static CODE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{2,8}\b").unwrap());

/// What to do with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Validate comma-separated codes.
    #[default]
    Validate,
    /// Suggest codes for a description.
    Suggest,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validate" => Ok(Action::Validate),
            "suggest" => Ok(Action::Suggest),
            other => Err(format!(
                "Unknown action: {}. Use: validate or suggest.",
                other
            )),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Validate => write!(f, "validate"),
            Action::Suggest => write!(f, "suggest"),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single query against the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Comma-separated codes, or a product description.
    pub query: String,
    /// Defaults to [`Action::Validate`].
    #[serde(default)]
    pub action: Action,
}

impl QueryRequest {
    /// A validation request.
    pub fn validate(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            action: Action::Validate,
        }
    }

    /// A suggestion request.
    pub fn suggest(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            action: Action::Suggest,
        }
    }

    /// Interpret a free-text chat message.
    ///
    /// `action: <validate|suggest>` and `query: <text>` markers are honoured.
    /// Without a query marker, text after the action word is the query; with
    /// no markers at all a message containing digits validates every 2-8
    /// digit run in it, and anything else is a description to suggest for.
    pub fn from_message(message: &str) -> Self {
        let mut action = None;
        let mut remainder = None;
        if let Some(caps) = ACTION_MARKER.captures(message) {
            if let Ok(parsed) = caps[1].parse::<Action>() {
                action = Some(parsed);
                remainder = Some(caps[2].trim().to_string());
            }
        }

        if let Some(caps) = QUERY_MARKER.captures(message) {
            return Self {
                query: caps[1].trim().to_string(),
                action: action.unwrap_or_default(),
            };
        }

        if let (Some(action), Some(rest)) = (action, remainder) {
            if !rest.is_empty() {
                return Self { query: rest, action };
            }
        }

        if message.chars().any(|c| c.is_ascii_digit()) {
            let codes: Vec<&str> = CODE_RUN.find_iter(message).map(|m| m.as_str()).collect();
            let query = if codes.is_empty() {
                message.trim().to_string()
            } else {
                codes.join(", ")
            };
            Self::validate(query)
        } else {
            Self::suggest(message.trim())
        }
    }
}

/// Validation outcome for one code, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub valid: bool,
    pub nearest: Option<String>,
    pub description: Option<String>,
    pub error: Option<String>,
}

impl From<ValidationResult> for ValidationEntry {
    fn from(result: ValidationResult) -> Self {
        Self {
            valid: result.valid,
            nearest: result.nearest,
            description: result.description,
            error: result.error,
        }
    }
}

/// Suggestions for one description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    /// Ranked candidates, best first.
    pub suggestions: Vec<Suggestion>,
    /// The normalized query that was scored.
    pub query: String,
    /// Set when the description was empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to a [`QueryRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    /// Ranked suggestions.
    Suggest(SuggestResponse),
    /// Results keyed by input code, in input order.
    Validate(IndexMap<String, ValidationEntry>),
}

impl QueryResponse {
    /// Build a validation response. A repeated code keeps its first
    /// position and its last result.
    pub fn from_validation(results: Vec<ValidationResult>) -> Self {
        let mut map = IndexMap::with_capacity(results.len());
        for result in results {
            map.insert(result.input_code.clone(), ValidationEntry::from(result));
        }
        QueryResponse::Validate(map)
    }

    /// Build a suggestion response; confidences are rounded to 3 decimals.
    pub fn from_suggestions(query: impl Into<String>, suggestions: Vec<Suggestion>) -> Self {
        let query = query.into();
        let error = query
            .is_empty()
            .then(|| "Empty description provided".to_string());
        let suggestions = suggestions
            .into_iter()
            .map(|s| Suggestion {
                confidence: round3(s.confidence),
                ..s
            })
            .collect();
        QueryResponse::Suggest(SuggestResponse {
            suggestions,
            query,
            error,
        })
    }

    /// Render the response as a plain-text report.
    pub fn render_text(&self) -> String {
        match self {
            QueryResponse::Validate(results) => {
                let mut out = String::from("HSN Code Validation Results:\n\n");
                for (code, entry) in results {
                    let status = if entry.valid { "Valid" } else { "Invalid" };
                    out.push_str(&format!("**{}**: {}\n", code, status));
                    if entry.valid {
                        out.push_str(&format!(
                            "   Description: {}\n",
                            entry.description.as_deref().unwrap_or("")
                        ));
                    } else {
                        out.push_str(&format!(
                            "   Error: {}\n",
                            entry.error.as_deref().unwrap_or("")
                        ));
                        if let Some(nearest) = &entry.nearest {
                            out.push_str(&format!(
                                "   Suggested: {} - {}\n",
                                nearest,
                                entry.description.as_deref().unwrap_or("")
                            ));
                        }
                    }
                    out.push('\n');
                }
                out
            }
            QueryResponse::Suggest(response) => {
                if response.suggestions.is_empty() {
                    return "No HSN code suggestions found for the given query.".to_string();
                }
                let mut out = String::from("HSN Code Suggestions:\n\n");
                for (i, s) in response.suggestions.iter().enumerate() {
                    out.push_str(&format!(
                        "{}. {} (Confidence: {:.1}%)\n   {}\n\n",
                        i + 1,
                        s.code,
                        s.confidence * 100.0,
                        s.description
                    ));
                }
                out
            }
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
