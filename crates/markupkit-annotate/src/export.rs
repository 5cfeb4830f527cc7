//! Annotation export: JSON, markdown list and the submission report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use markupkit_core::Result;

use crate::model::Annotation;

/// Text shown for annotations without a description.
pub const EMPTY_DESCRIPTION: &str = "No description";

/// Output format for [`export_annotations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// One markdown line: `N. <glyph> [category] description`.
pub fn markdown_line(number: usize, annotation: &Annotation) -> String {
    let text = if annotation.has_empty_text() {
        EMPTY_DESCRIPTION
    } else {
        annotation.text.trim()
    };
    format!(
        "{}. {} [{}] {}",
        number,
        annotation.priority.glyph(),
        annotation.category,
        text
    )
}

/// Numbered markdown list, one line per annotation.
pub fn markdown_list(annotations: &[Annotation]) -> String {
    annotations
        .iter()
        .enumerate()
        .map(|(i, a)| markdown_line(i + 1, a))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the annotation list in the requested format.
pub fn export_annotations(annotations: &[Annotation], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(annotations)?),
        ExportFormat::Markdown => Ok(markdown_list(annotations)),
    }
}

/// Report sent along with a design review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub url: String,
    pub date: DateTime<Utc>,
    pub annotations: Vec<Annotation>,
}

impl SubmissionReport {
    pub fn new(url: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            url: url.into(),
            date: Utc::now(),
            annotations,
        }
    }

    /// Sets the report date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# 🎨 Design Annotations\n\n");
        out.push_str(&format!("**URL:** {}\n", self.url));
        out.push_str(&format!(
            "**Date:** {}\n\n",
            self.date.format("%Y-%m-%d %H:%M UTC")
        ));
        if self.annotations.is_empty() {
            out.push_str("_No annotations._\n");
        } else {
            out.push_str(&markdown_list(&self.annotations));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
