//! Output schema types for structured generation.
//!
//! An [`OutputSchema`] declares the fields a generated record must carry.
//! Field order is semantic: validation, repair, and value-only collapsing
//! all walk fields in declaration order.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a `<placeholder>` span in a key or value.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<.*?>").expect("placeholder pattern compiles"));

/// The kind of a schema field.
///
/// Built once from the caller-supplied schema, so attempts never have to
/// re-inspect raw structure to decide how a field should be treated.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text; the marker describes what to generate (e.g. "answer with
    /// max length of 15 words").
    Literal(String),
    /// Closed set of allowed string values.
    Enumeration(Vec<String>),
    /// Nested record with its own schema.
    Nested(OutputSchema),
}

impl FieldKind {
    /// A free-text field with the given marker.
    pub fn literal(marker: impl Into<String>) -> Self {
        FieldKind::Literal(marker.into())
    }

    /// A closed-choice field over the given values.
    pub fn enumeration<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Enumeration(choices.into_iter().map(Into::into).collect())
    }

    /// A nested record field.
    pub fn nested(schema: OutputSchema) -> Self {
        FieldKind::Nested(schema)
    }

    fn render_into(&self, out: &mut String) {
        match self {
            FieldKind::Literal(marker) => out.push_str(&json_str(marker)),
            FieldKind::Enumeration(choices) => {
                out.push('[');
                for (i, choice) in choices.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&json_str(choice));
                }
                out.push(']');
            }
            FieldKind::Nested(schema) => out.push_str(&schema.render()),
        }
    }

    fn contains_placeholder(&self) -> bool {
        match self {
            FieldKind::Literal(marker) => PLACEHOLDER_RE.is_match(marker),
            FieldKind::Enumeration(choices) => {
                choices.iter().any(|c| PLACEHOLDER_RE.is_match(c))
            }
            FieldKind::Nested(schema) => schema.contains_placeholder(),
        }
    }

    fn contains_enumeration(&self) -> bool {
        match self {
            FieldKind::Literal(_) => false,
            FieldKind::Enumeration(_) => true,
            FieldKind::Nested(schema) => schema.contains_enumeration(),
        }
    }
}

/// A named schema field.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct SchemaField {
    /// Field name; may itself contain a `<placeholder>` marker.
    name: String,
    /// What the field holds.
    kind: FieldKind,
}

/// An ordered mapping from field name to [`FieldKind`].
///
/// # Examples
///
/// ```
/// use quizforge_core::{FieldKind, OutputSchema};
///
/// let schema = OutputSchema::new()
///     .field("question", FieldKind::literal("question"))
///     .field("answer", FieldKind::literal("answer with max length of 15 words"));
///
/// assert_eq!(schema.fields().len(), 2);
/// assert!(!schema.contains_enumeration());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputSchema {
    fields: Vec<SchemaField>,
}

impl OutputSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, preserving declaration order.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            kind,
        });
        self
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// True if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field kind by name.
    pub fn get(&self, name: &str) -> Option<&FieldKind> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.kind)
    }

    /// Serializes the schema to the JSON text embedded in prompts,
    /// preserving declaration order.
    pub fn render(&self) -> String {
        let mut out = String::from("{");
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&json_str(&field.name));
            out.push(':');
            field.kind.render_into(&mut out);
        }
        out.push('}');
        out
    }

    /// True if any field (recursively) is an enumeration.
    pub fn contains_enumeration(&self) -> bool {
        self.fields.iter().any(|f| f.kind.contains_enumeration())
    }

    /// True if any key or value (recursively) carries a `<placeholder>` marker.
    pub fn contains_placeholder(&self) -> bool {
        self.fields
            .iter()
            .any(|f| Self::is_placeholder_key(&f.name) || f.kind.contains_placeholder())
    }

    /// True if the key itself is a placeholder the backend must replace
    /// with a generated key name.
    pub fn is_placeholder_key(key: &str) -> bool {
        PLACEHOLDER_RE.is_match(key)
    }
}

fn json_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_schema() -> OutputSchema {
        OutputSchema::new()
            .field("question", FieldKind::literal("question"))
            .field("answer", FieldKind::literal("answer with max length of 15 words"))
            .field("difficulty", FieldKind::enumeration(["easy", "medium", "hard"]))
    }

    #[test]
    fn render_preserves_declaration_order() {
        let rendered = quiz_schema().render();
        assert_eq!(
            rendered,
            r#"{"question":"question","answer":"answer with max length of 15 words","difficulty":["easy","medium","hard"]}"#
        );
    }

    #[test]
    fn render_escapes_quotes_in_markers() {
        let schema = OutputSchema::new().field("title", FieldKind::literal(r#"a "quoted" title"#));
        assert_eq!(schema.render(), r#"{"title":"a \"quoted\" title"}"#);
    }

    #[test]
    fn detects_enumerations_recursively() {
        assert!(quiz_schema().contains_enumeration());

        let nested = OutputSchema::new().field(
            "inner",
            FieldKind::nested(
                OutputSchema::new().field("level", FieldKind::enumeration(["a", "b"])),
            ),
        );
        assert!(nested.contains_enumeration());

        let plain = OutputSchema::new().field("question", FieldKind::literal("question"));
        assert!(!plain.contains_enumeration());
    }

    #[test]
    fn detects_placeholders_in_keys_and_values() {
        assert!(!quiz_schema().contains_placeholder());

        let keyed = OutputSchema::new().field("<topic>", FieldKind::literal("description"));
        assert!(keyed.contains_placeholder());
        assert!(OutputSchema::is_placeholder_key("<topic>"));

        let valued = OutputSchema::new()
            .field("hint", FieldKind::literal("go to <location> and look around"));
        assert!(valued.contains_placeholder());
    }

    #[test]
    fn lookup_by_name() {
        let schema = quiz_schema();
        assert!(matches!(schema.get("question"), Some(FieldKind::Literal(_))));
        assert!(matches!(
            schema.get("difficulty"),
            Some(FieldKind::Enumeration(_))
        ));
        assert!(schema.get("missing").is_none());
    }
}
