//! Contracts with the language-model collaborators.
//!
//! Three models consume the summaries built by this crate:
//!
//! - `sqlcoder` turns a question plus an annotated schema into SQL
//! - `data2viz` turns a question plus a data sample into a Vega-Lite chart
//! - `followup` turns a question into suggested follow-up questions
//!
//! This module defines the JSON request payload, the [`ModelBackend`]
//! capability trait, prompt assembly and output post-processing. Transport and
//! model weights stay behind [`TextGenerator`] implementations supplied by the
//! caller.

pub mod backend;
pub mod postprocess;
pub mod prompts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BriefError, BriefResult};

pub use backend::{LoadOnce, ModelBackend, ModelRegistry, PromptedBackend, TextGenerator};
pub use postprocess::{extract_json_object, extract_questions, extract_sql, postgres_to_sqlite};
pub use prompts::{data_sample, followup_prompt, sql_prompt, visualization_prompt};

/// The model a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Text-to-SQL generation
    #[serde(rename = "sqlcoder")]
    SqlCoder,
    /// Chart specification generation
    #[serde(rename = "data2viz")]
    Data2Viz,
    /// Follow-up question suggestions
    #[serde(rename = "followup")]
    Followup,
}

impl ModelKind {
    /// Wire name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::SqlCoder => "sqlcoder",
            ModelKind::Data2Viz => "data2viz",
            ModelKind::Followup => "followup",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = BriefError;

    fn from_str(s: &str) -> BriefResult<Self> {
        match s {
            "sqlcoder" => Ok(ModelKind::SqlCoder),
            "data2viz" => Ok(ModelKind::Data2Viz),
            "followup" => Ok(ModelKind::Followup),
            other => Err(BriefError::ModelNotFound(other.to_string())),
        }
    }
}

/// JSON payload of an inference call.
///
/// Every field is optional on the wire; `model_name` defaults to `sqlcoder`.
///
/// ```rust
/// use sql_brief::inference::InferenceRequest;
///
/// let request: InferenceRequest =
///     serde_json::from_str(r#"{"question": "How many orders?", "schema": "CREATE TABLE o (\nid INTEGER\n)"}"#)
///         .unwrap();
/// assert_eq!(request.model_name, "sqlcoder");
/// assert!(request.query_result.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceRequest {
    pub question: String,
    pub query: String,
    pub prompt: String,
    pub schema: String,
    pub query_result: String,
    pub model_name: String,
}

impl Default for InferenceRequest {
    fn default() -> Self {
        Self {
            question: String::new(),
            query: String::new(),
            prompt: String::new(),
            schema: String::new(),
            query_result: String::new(),
            model_name: ModelKind::SqlCoder.as_str().to_string(),
        }
    }
}

impl InferenceRequest {
    /// Request for SQL generation against an (annotated) schema.
    pub fn sql(question: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            schema: schema.into(),
            ..Self::default()
        }
    }

    /// Request for a chart over a query result sample.
    pub fn visualization(question: impl Into<String>, query_result: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            query_result: query_result.into(),
            model_name: ModelKind::Data2Viz.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Request for follow-up question suggestions.
    pub fn followup(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            model_name: ModelKind::Followup.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Resolves the target model.
    pub fn model_kind(&self) -> BriefResult<ModelKind> {
        self.model_name.parse()
    }
}

/// Post-processed output of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InferenceOutput {
    /// Generated SQL
    Sql(String),
    /// Parsed chart specification
    Chart(serde_json::Value),
    /// Raw text that could not be parsed further
    Text(String),
    /// Suggested questions
    Questions(Vec<String>),
}
