//! Shared types for resource entries and operation errors

use serde::Serialize;
use thiserror::Error;

/// Errors from resource-file operations
#[derive(Error, Debug)]
pub enum ResxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid resource key: {0:?}")]
    InvalidKey(String),
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
}

/// Byte range of a node in the original source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

/// A single `<data>` entry in a resource file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    /// Entry key (the `name` attribute)
    pub name: String,
    /// Value text; empty when the entry has no `<value>` element
    pub value: String,
    /// Optional `<comment>` text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `type` attribute for non-string payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// `mimetype` attribute for serialized payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Where the entry's original serialization lives in the source text
    pub span: Span,
}

impl ResourceEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comment: None,
            type_name: None,
            mime_type: None,
            span: Span::new(0, 0),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// True when the entry carries a plain string payload
    pub fn is_string(&self) -> bool {
        self.type_name.is_none() && self.mime_type.is_none()
    }
}
