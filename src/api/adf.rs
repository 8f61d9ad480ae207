//! Atlassian Document Format (ADF) handling.
//!
//! Rich-text fields (issue descriptions, comment bodies) arrive either as
//! a plain string (legacy issues) or as a nested ADF document. The decoder
//! here is total over all JSON input: it never fails the surrounding
//! deserialization, trading strict validation for robustness against
//! upstream format drift.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flatten a rich-text field into a display string.
///
/// - a plain string is returned unchanged;
/// - `null` yields the empty string;
/// - an ADF object is flattened, one line per paragraph, in document order;
/// - any other shape (number, bool, top-level array) yields the empty string.
///
/// Pure function: identical input always yields identical output.
pub fn decode_rich_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(_) => match serde_json::from_value::<AtlassianDoc>(value.clone()) {
            Ok(doc) => doc.to_plain_text(),
            Err(_) => String::new(),
        },
        _ => String::new(),
    }
}

/// An ADF document: a `doc` root holding an ordered content sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlassianDoc {
    /// The node type, `"doc"` at the root.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// The format version, currently 1.
    #[serde(default)]
    pub version: Option<u32>,
    /// Ordered content nodes. Kept untyped so unknown block kinds survive
    /// a round trip.
    #[serde(default)]
    pub content: Vec<Value>,
}

impl AtlassianDoc {
    /// Build a document from plain text, one paragraph per line.
    ///
    /// Used for outbound descriptions and comments; Jira Cloud rejects
    /// plain strings in v3 rich-text fields.
    pub fn from_text(text: &str) -> Self {
        let content = text
            .lines()
            .map(|line| {
                let runs: Vec<Value> = if line.is_empty() {
                    Vec::new()
                } else {
                    vec![serde_json::json!({"type": "text", "text": line})]
                };
                serde_json::json!({"type": "paragraph", "content": runs})
            })
            .collect();

        Self {
            doc_type: "doc".to_string(),
            version: Some(1),
            content,
        }
    }

    /// Flatten the document to plain text.
    ///
    /// `text` nodes contribute their literal text verbatim; paragraphs and
    /// headings terminate their subtree with a line break; unrecognized
    /// node kinds contribute nothing themselves but their children are
    /// still traversed, so new block types degrade gracefully.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            flatten(node, &mut out);
        }
        out.trim().to_string()
    }
}

impl Default for AtlassianDoc {
    fn default() -> Self {
        Self {
            doc_type: "doc".to_string(),
            version: Some(1),
            content: Vec::new(),
        }
    }
}

fn flatten(node: &Value, out: &mut String) {
    match node {
        Value::Array(items) => {
            for item in items {
                flatten(item, out);
            }
        }
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str);
            match kind {
                Some("text") => {
                    if let Some(text) = obj.get("text").and_then(Value::as_str) {
                        out.push_str(text);
                    }
                }
                Some("hardBreak") => out.push('\n'),
                _ => {
                    if let Some(children) = obj.get("content") {
                        flatten(children, out);
                    }
                    // Block nodes close their own line.
                    if matches!(kind, Some("paragraph") | Some("heading"))
                        && !out.is_empty()
                        && !out.ends_with('\n')
                    {
                        out.push('\n');
                    }
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_is_returned_unchanged() {
        assert_eq!(decode_rich_text(&json!("hello")), "hello");
    }

    #[test]
    fn null_decodes_to_empty() {
        assert_eq!(decode_rich_text(&Value::Null), "");
    }

    #[test]
    fn non_document_shapes_decode_to_empty() {
        assert_eq!(decode_rich_text(&json!(42)), "");
        assert_eq!(decode_rich_text(&json!(true)), "");
        assert_eq!(decode_rich_text(&json!(["a", "b"])), "");
    }

    #[test]
    fn object_without_doc_shape_decodes_to_empty() {
        assert_eq!(decode_rich_text(&json!({"unexpected": "shape"})), "");
    }

    #[test]
    fn one_line_per_paragraph_in_document_order() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "Line one"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Line two"}]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "Line one\nLine two");
    }

    #[test]
    fn adjacent_text_runs_concatenate_verbatim() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Hello, "},
                    {"type": "text", "text": "world!"}
                ]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "Hello, world!");
    }

    #[test]
    fn unknown_node_kinds_are_skipped_but_children_survive() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "panel", "attrs": {"panelType": "info"}, "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Inside a panel"}]}
                ]},
                {"type": "futureBlockType"}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "Inside a panel");
    }

    #[test]
    fn non_text_leaves_contribute_nothing() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "before"},
                    {"type": "inlineCard", "attrs": {"url": "https://example.com"}},
                    {"type": "text", "text": "after"}
                ]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "beforeafter");
    }

    #[test]
    fn hard_break_inserts_a_newline_within_a_paragraph() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Line one"},
                    {"type": "hardBreak"},
                    {"type": "text", "text": "Line two"}
                ]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "Line one\nLine two");
    }

    #[test]
    fn heading_closes_its_line() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Title"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Body text."}]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "Title\nBody text.");
    }

    #[test]
    fn result_is_trimmed_of_surrounding_whitespace() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": []},
                {"type": "paragraph", "content": [{"type": "text", "text": "only line"}]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), "only line");
    }

    #[test]
    fn decoding_is_idempotent_on_the_same_input() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "stable"}]}
            ]
        });
        assert_eq!(decode_rich_text(&doc), decode_rich_text(&doc));
    }

    #[test]
    fn empty_document_decodes_to_empty() {
        assert_eq!(AtlassianDoc::default().to_plain_text(), "");
    }

    #[test]
    fn from_text_builds_one_paragraph_per_line() {
        let doc = AtlassianDoc::from_text("first\nsecond");
        assert_eq!(doc.content.len(), 2);
        assert_eq!(doc.to_plain_text(), "first\nsecond");
    }

    #[test]
    fn from_text_round_trips_through_serde() {
        let doc = AtlassianDoc::from_text("release notes");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(decode_rich_text(&value), "release notes");
    }
}
