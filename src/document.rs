//! RESX document parsing and merge-append rendering
//!
//! The parsed document keeps the original source text alongside the entry
//! table. Rewrites are produced by splicing a rendered `<data>` block into
//! the original text, so every byte not belonging to the new entry survives
//! verbatim: header, schema, resheaders, comments, whitespace, and entries
//! with non-string payloads.

use crate::types::{ResourceEntry, ResxError, Span};
use std::collections::HashMap;

/// An ordered RESX entry table bound to its source text
#[derive(Debug, Clone)]
pub struct ResxDocument {
    source: String,
    entries: Vec<ResourceEntry>,
    /// Key -> index of the first occurrence in document order
    by_key: HashMap<String, usize>,
    root_span: Span,
    root_tag: String,
}

impl ResxDocument {
    /// Parse RESX source text
    pub fn parse(source: &str) -> Result<ResxDocument, ResxError> {
        let doc = roxmltree::Document::parse(source)
            .map_err(|e| ResxError::Parse(e.to_string()))?;

        let root = doc.root_element();
        let root_span = Span::from(root.range());
        let root_tag = root.tag_name().name().to_string();

        let mut entries = Vec::new();
        for node in root.children().filter(|n| n.has_tag_name("data")) {
            let name = node
                .attribute("name")
                .ok_or_else(|| ResxError::Parse("data element missing name attribute".to_string()))?;

            let value = node
                .children()
                .find(|n| n.has_tag_name("value"))
                .and_then(|n| n.text())
                .unwrap_or("")
                .to_string();

            let comment = node
                .children()
                .find(|n| n.has_tag_name("comment"))
                .and_then(|n| n.text())
                .map(|s| s.to_string());

            entries.push(ResourceEntry {
                name: name.to_string(),
                value,
                comment,
                type_name: node.attribute("type").map(|s| s.to_string()),
                mime_type: node.attribute("mimetype").map(|s| s.to_string()),
                span: Span::from(node.range()),
            });
        }

        // First occurrence wins; later duplicates stay in the sequence so
        // rewrites never drop them.
        let mut by_key = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_key.entry(entry.name.clone()).or_insert(idx);
        }

        Ok(ResxDocument {
            source: source.to_string(),
            entries,
            by_key,
            root_span,
            root_tag,
        })
    }

    /// Entries in document order
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// First entry whose key equals `key`
    pub fn find_by_key(&self, key: &str) -> Option<&ResourceEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    /// First entry in document order whose value equals `value` exactly
    pub fn find_by_value(&self, value: &str) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// The entry's original serialization, sliced from the source text
    pub fn raw_entry(&self, entry: &ResourceEntry) -> &str {
        &self.source[entry.span.start..entry.span.end]
    }

    /// The source text this document was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the full file text with a new entry appended after the last
    /// existing one. Original bytes are preserved verbatim; only the new
    /// `<data>` block is inserted.
    pub fn render_with_appended(&self, key: &str, value: &str) -> Result<String, ResxError> {
        let i = self.entry_indent();
        let block = format!(
            "{i}<data name=\"{key}\" xml:space=\"preserve\">\n{i}{i}<value>{value}</value>\n{i}</data>\n",
            i = i,
            key = escape_xml(key),
            value = escape_xml(value),
        );

        let root_text = &self.source[self.root_span.start..self.root_span.end];
        match root_text.rfind("</") {
            Some(rel) => {
                let close = self.root_span.start + rel;
                let line_start = self.source[..close]
                    .rfind('\n')
                    .map(|p| p + 1)
                    .unwrap_or(0);
                let prefix = &self.source[line_start..close];
                let prefix_is_ws =
                    !prefix.is_empty() && prefix.chars().all(|c| c == ' ' || c == '\t');

                // Insert at the start of the close-tag line so the close tag
                // keeps its own indentation; fall back to inserting directly
                // before the tag when it does not sit on its own line.
                let at = if prefix_is_ws { line_start } else { close };
                let lead = if self.source[..at].ends_with('\n') || at == 0 {
                    ""
                } else {
                    "\n"
                };
                Ok(format!(
                    "{}{}{}{}",
                    &self.source[..at],
                    lead,
                    block,
                    &self.source[at..]
                ))
            }
            None => {
                // Self-closing root: expand it in place
                let slash = root_text.rfind("/>").ok_or_else(|| {
                    ResxError::Parse("root element cannot be extended".to_string())
                })?;
                let at = self.root_span.start + slash;
                Ok(format!(
                    "{}>\n{}</{}>{}",
                    &self.source[..at],
                    block,
                    self.root_tag,
                    &self.source[self.root_span.end..]
                ))
            }
        }
    }

    /// Indentation of the last entry, defaulting to two spaces
    fn entry_indent(&self) -> String {
        if let Some(last) = self.entries.last() {
            let line_start = self.source[..last.span.start]
                .rfind('\n')
                .map(|p| p + 1)
                .unwrap_or(0);
            let prefix = &self.source[line_start..last.span.start];
            if !prefix.is_empty() && prefix.chars().all(|c| c == ' ' || c == '\t') {
                return prefix.to_string();
            }
        }
        "  ".to_string()
    }

    /// Standard empty RESX skeleton
    pub fn template() -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str("<root>\n");
        out.push_str("  <resheader name=\"resmimetype\">\n");
        out.push_str("    <value>text/microsoft-resx</value>\n");
        out.push_str("  </resheader>\n");
        out.push_str("  <resheader name=\"version\">\n");
        out.push_str("    <value>2.0</value>\n");
        out.push_str("  </resheader>\n");
        out.push_str("  <resheader name=\"reader\">\n");
        out.push_str("    <value>System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089</value>\n");
        out.push_str("  </resheader>\n");
        out.push_str("  <resheader name=\"writer\">\n");
        out.push_str("    <value>System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089</value>\n");
        out.push_str("  </resheader>\n");
        out.push_str("</root>\n");
        out
    }
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
