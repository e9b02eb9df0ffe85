//! Source formats that yield [`RawDefinition`]s.
//!
//! Two formats are understood:
//!
//! - element records (`*.element.json`, `*.element.yaml`, `*.element.yml`):
//!   one [`RawDefinition`] or a list of them, written by hand;
//! - Custom Elements Manifests (`custom-elements.json`), as emitted by
//!   static analyzers of element definition sites.
//!
//! Parsing is pure: callers read the file and pass its text in.

use crate::error::SourceError;
use crate::extract::{RawDefinition, RawMember, RawMethod};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// File name of a Custom Elements Manifest.
pub const MANIFEST_FILE_NAME: &str = "custom-elements.json";

/// Recognized element record suffixes.
pub const RECORD_SUFFIXES: &[(&str, SourceKind)] = &[
    (".element.json", SourceKind::JsonRecord),
    (".element.yaml", SourceKind::YamlRecord),
    (".element.yml", SourceKind::YamlRecord),
];

/// Format of a definition source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceKind {
    JsonRecord,
    YamlRecord,
    Manifest,
}

impl SourceKind {
    /// Determines the source kind from a file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name == MANIFEST_FILE_NAME {
            return Some(SourceKind::Manifest);
        }
        RECORD_SUFFIXES
            .iter()
            .find(|(suffix, _)| name.len() > suffix.len() && name.ends_with(suffix))
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::JsonRecord => "json record",
            SourceKind::YamlRecord => "yaml record",
            SourceKind::Manifest => "custom elements manifest",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses definitions from source text of the given kind.
///
/// `origin` is recorded on every definition so reports can point back at
/// the file.
pub fn parse_source(
    text: &str,
    kind: SourceKind,
    origin: Option<&str>,
) -> Result<Vec<RawDefinition>, SourceError> {
    let mut raws = match kind {
        SourceKind::JsonRecord => parse_json_records(text)?,
        SourceKind::YamlRecord => parse_yaml_records(text)?,
        SourceKind::Manifest => parse_manifest(text)?,
    };
    for raw in &mut raws {
        raw.origin = origin.map(str::to_string);
    }
    Ok(raws)
}

/// Parses a JSON element record: one definition or an array of them.
///
/// The shape is chosen from the document's first token so that field errors
/// (e.g. an unknown field) are reported as they are, with their position.
pub fn parse_json_records(text: &str) -> Result<Vec<RawDefinition>, SourceError> {
    if text.trim_start().starts_with('[') {
        Ok(serde_json::from_str(text)?)
    } else {
        let raw: RawDefinition = serde_json::from_str(text)?;
        Ok(vec![raw])
    }
}

/// Parses a YAML element record: one definition or a sequence of them.
pub fn parse_yaml_records(text: &str) -> Result<Vec<RawDefinition>, SourceError> {
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    if document.is_sequence() {
        Ok(serde_yaml::from_str(text)?)
    } else {
        let raw: RawDefinition = serde_yaml::from_str(text)?;
        Ok(vec![raw])
    }
}

// =============================================================================
// Custom Elements Manifest
// =============================================================================

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    modules: Vec<ManifestModule>,
}

#[derive(Debug, Deserialize)]
struct ManifestModule {
    #[serde(default)]
    declarations: Vec<ManifestDeclaration>,
    #[serde(default)]
    exports: Vec<ManifestExport>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestDeclaration {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tag_name: Option<String>,
    #[serde(default)]
    custom_element: bool,
    #[serde(default)]
    attributes: Vec<ManifestAttribute>,
    #[serde(default)]
    members: Vec<ManifestMember>,
    #[serde(default)]
    events: Vec<ManifestEvent>,
    #[serde(default)]
    slots: Vec<ManifestSlot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestAttribute {
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<ManifestType>,
    #[serde(default)]
    field_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestMember {
    kind: String,
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<ManifestType>,
    #[serde(default)]
    privacy: Option<String>,
    #[serde(rename = "static", default)]
    is_static: bool,
    #[serde(default)]
    parameters: Vec<ManifestParameter>,
}

#[derive(Debug, Deserialize)]
struct ManifestParameter {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ManifestType {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ManifestEvent {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestSlot {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ManifestExport {
    kind: String,
    name: String,
    #[serde(default)]
    declaration: Option<ManifestReference>,
}

#[derive(Debug, Deserialize)]
struct ManifestReference {
    name: String,
}

impl ManifestDeclaration {
    fn is_element(&self) -> bool {
        self.custom_element || self.tag_name.is_some()
    }
}

impl ManifestMember {
    fn is_public_instance(&self) -> bool {
        !self.is_static
            && !self.name.starts_with('#')
            && !matches!(self.privacy.as_deref(), Some("private" | "protected"))
    }
}

/// Parses a Custom Elements Manifest into raw definitions, one per element
/// declaration, in document order.
pub fn parse_manifest(text: &str) -> Result<Vec<RawDefinition>, SourceError> {
    let manifest: Manifest = serde_json::from_str(text)?;

    // Tags registered through `customElements.define` show up as exports.
    let defined_tags: HashMap<&str, &str> = manifest
        .modules
        .iter()
        .flat_map(|module| module.exports.iter())
        .filter(|export| export.kind == "custom-element-definition")
        .filter_map(|export| {
            export
                .declaration
                .as_ref()
                .map(|decl| (decl.name.as_str(), export.name.as_str()))
        })
        .collect();

    let raws = manifest
        .modules
        .iter()
        .flat_map(|module| module.declarations.iter())
        .filter(|decl| decl.kind.as_deref().map_or(true, |kind| kind == "class"))
        .filter(|decl| {
            decl.is_element()
                || decl
                    .name
                    .as_deref()
                    .is_some_and(|name| defined_tags.contains_key(name))
        })
        .map(|decl| declaration_to_raw(decl, &defined_tags))
        .collect();

    Ok(raws)
}

fn declaration_to_raw(decl: &ManifestDeclaration, defined_tags: &HashMap<&str, &str>) -> RawDefinition {
    let tag_name = decl.tag_name.clone().or_else(|| {
        decl.name
            .as_deref()
            .and_then(|name| defined_tags.get(name))
            .map(|tag| tag.to_string())
    });

    let fields: Vec<&ManifestMember> = decl
        .members
        .iter()
        .filter(|member| member.kind == "field" && member.is_public_instance())
        .collect();

    let attributes = decl
        .attributes
        .iter()
        .map(|attribute| {
            let text = attribute.ty.as_ref().map(|ty| ty.text.as_str()).or_else(|| {
                // Fall back to the reflected field's type.
                let field_name = attribute.field_name.as_deref()?;
                fields
                    .iter()
                    .find(|field| field.name == field_name)
                    .and_then(|field| field.ty.as_ref())
                    .map(|ty| ty.text.as_str())
            });
            RawMember {
                name: attribute.name.clone(),
                ty: text.map(|text| normalize_attribute_type(text).to_string()),
            }
        })
        .collect();

    let properties = fields
        .iter()
        .map(|field| RawMember {
            name: field.name.clone(),
            ty: field
                .ty
                .as_ref()
                .map(|ty| normalize_property_type(&ty.text).to_string()),
        })
        .collect();

    let methods = decl
        .members
        .iter()
        .filter(|member| member.kind == "method" && member.is_public_instance())
        .map(|member| RawMethod {
            name: member.name.clone(),
            arity: None,
            parameters: member.parameters.iter().map(|p| p.name.clone()).collect(),
        })
        .collect();

    RawDefinition {
        tag_name,
        attributes,
        properties,
        methods,
        events: decl.events.iter().filter_map(|event| event.name.clone()).collect(),
        slots: decl.slots.iter().map(|slot| slot.name.clone()).collect(),
        allow_reserved: Vec::new(),
        class_name: decl.name.clone(),
        origin: None,
    }
}

/// Classification of a TypeScript-style type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeShape {
    Boolean,
    String,
    Number,
    Array,
    Other,
}

fn classify_type(text: &str) -> Option<TypeShape> {
    let text = strip_outer_parens(text.trim());
    let parts: Vec<&str> = split_top_level_union(text)
        .into_iter()
        .map(|part| strip_outer_parens(part.trim()))
        .filter(|part| !part.is_empty() && *part != "undefined" && *part != "null")
        .collect();
    if parts.is_empty() {
        return None;
    }

    let shapes: Vec<TypeShape> = parts.iter().map(|part| classify_part(part)).collect();
    let first = shapes[0];
    if shapes.iter().all(|shape| *shape == first) {
        Some(first)
    } else {
        Some(TypeShape::Other)
    }
}

/// Splits a union on `|` outside of `<>`, `()`, `[]` and `{}`.
fn split_top_level_union(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut previous = ' ';
    for (index, ch) in text.char_indices() {
        match ch {
            // `=>` in a function type is not a closing bracket.
            '>' if previous == '=' => {}
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
        previous = ch;
    }
    parts.push(&text[start..]);
    parts
}

/// Removes parentheses that wrap the whole expression, e.g. `((string))`.
fn strip_outer_parens(mut text: &str) -> &str {
    while text.starts_with('(') && text.ends_with(')') && closes_at_end(text) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// True when the opening parenthesis at index 0 is closed by the last byte.
fn closes_at_end(text: &str) -> bool {
    let mut depth = 0usize;
    for (index, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index == text.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

fn classify_part(part: &str) -> TypeShape {
    let quoted = |q: char| part.len() >= 2 && part.starts_with(q) && part.ends_with(q);
    if quoted('\'') || quoted('"') || quoted('`') {
        return TypeShape::String;
    }
    if part.parse::<f64>().is_ok() {
        return TypeShape::Number;
    }
    match part.to_ascii_lowercase().as_str() {
        "boolean" | "true" | "false" => TypeShape::Boolean,
        "string" => TypeShape::String,
        "number" | "bigint" => TypeShape::Number,
        _ if part.ends_with("[]") || part.starts_with("Array<") || part.starts_with("ReadonlyArray<") => {
            TypeShape::Array
        }
        _ => TypeShape::Other,
    }
}

/// Maps a manifest attribute type to `boolean`/`string`, or returns the text
/// unchanged so extraction reports it.
fn normalize_attribute_type(text: &str) -> &str {
    match classify_type(text) {
        Some(TypeShape::Boolean) => "boolean",
        Some(TypeShape::String) => "string",
        _ => text,
    }
}

/// Maps a manifest field type to a property type name. Named and mixed types
/// are objects.
fn normalize_property_type(text: &str) -> &str {
    match classify_type(text) {
        Some(TypeShape::Boolean) => "boolean",
        Some(TypeShape::String) => "string",
        Some(TypeShape::Number) => "number",
        Some(TypeShape::Array) => "array",
        Some(TypeShape::Other) => "object",
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(
            SourceKind::from_path(Path::new("src/custom-elements.json")),
            Some(SourceKind::Manifest)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("button.element.json")),
            Some(SourceKind::JsonRecord)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("Button.Element.YML")),
            Some(SourceKind::YamlRecord)
        );
        assert_eq!(SourceKind::from_path(Path::new(".element.json")), None);
        assert_eq!(SourceKind::from_path(Path::new("package.json")), None);
    }

    #[test]
    fn test_json_record_single_and_many() {
        let one = parse_json_records(r#"{"tagName": "org-button", "events": ["org-press"]}"#).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].tag_name.as_deref(), Some("org-button"));

        let many = parse_json_records(r#"[{"tagName": "org-a"}, {"tagName": "org-b"}]"#).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_json_record_rejects_unknown_fields() {
        let err = parse_json_records(r#"{"tagName": "org-a", "colour": "red"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `colour`"), "{}", err);

        let err = parse_json_records(r#"[{"tagName": "org-a"}, {"tagName": "org-b", "colour": 1}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown field `colour`"), "{}", err);
    }

    #[test]
    fn test_yaml_record_reports_unknown_field() {
        let err = parse_yaml_records("tagName: org-a\ncolour: red\n").unwrap_err();
        assert!(err.to_string().contains("unknown field `colour`"), "{}", err);

        let err = parse_yaml_records("- tagName: org-a\n- tagName: org-b\n  colour: red\n").unwrap_err();
        assert!(err.to_string().contains("unknown field `colour`"), "{}", err);
    }

    #[test]
    fn test_yaml_record() {
        let yaml = r#"
tagName: org-tabs
attributes:
  - name: selected
    type: string
slots: [tab, panel]
allowReserved: [title]
"#;
        let raws = parse_yaml_records(yaml).unwrap();
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].attributes[0].name, "selected");
        assert_eq!(raws[0].slots, vec!["tab", "panel"]);
        assert_eq!(raws[0].allow_reserved, vec!["title"]);
    }

    #[test]
    fn test_parse_source_sets_origin() {
        let raws = parse_source(
            r#"{"tagName": "org-a"}"#,
            SourceKind::JsonRecord,
            Some("a.element.json"),
        )
        .unwrap();
        assert_eq!(raws[0].origin.as_deref(), Some("a.element.json"));
    }

    const MANIFEST: &str = r#"{
      "schemaVersion": "1.0.0",
      "modules": [
        {
          "kind": "javascript-module",
          "path": "src/button.js",
          "declarations": [
            {
              "kind": "class",
              "name": "OrgButton",
              "customElement": true,
              "tagName": "org-button",
              "attributes": [
                { "name": "disabled", "type": { "text": "boolean" }, "fieldName": "disabled" },
                { "name": "variant", "type": { "text": "'primary' | 'secondary'" } },
                { "name": "label", "fieldName": "label" }
              ],
              "members": [
                { "kind": "field", "name": "disabled", "type": { "text": "boolean" } },
                { "kind": "field", "name": "label", "type": { "text": "string | undefined" } },
                { "kind": "field", "name": "items", "type": { "text": "Item[]" } },
                { "kind": "field", "name": "config", "type": { "text": "ButtonConfig" } },
                { "kind": "field", "name": "_internal", "privacy": "private", "type": { "text": "number" } },
                { "kind": "field", "name": "styles", "static": true, "type": { "text": "CSSResult" } },
                { "kind": "method", "name": "press", "parameters": [{ "name": "force" }] }
              ],
              "events": [{ "name": "org-press" }, { "description": "unnamed" }],
              "slots": [{ "name": "" }, { "name": "icon" }]
            },
            { "kind": "function", "name": "helper" }
          ],
          "exports": []
        },
        {
          "kind": "javascript-module",
          "path": "src/card.js",
          "declarations": [
            { "kind": "class", "name": "OrgCard", "customElement": true }
          ],
          "exports": [
            {
              "kind": "custom-element-definition",
              "name": "org-card",
              "declaration": { "name": "OrgCard", "module": "src/card.js" }
            }
          ]
        }
      ]
    }"#;

    #[test]
    fn test_manifest_declarations() {
        let raws = parse_manifest(MANIFEST).unwrap();
        assert_eq!(raws.len(), 2);

        let button = &raws[0];
        assert_eq!(button.tag_name.as_deref(), Some("org-button"));
        assert_eq!(
            button.attributes,
            vec![
                RawMember::new("disabled", Some("boolean")),
                RawMember::new("variant", Some("string")),
                RawMember::new("label", Some("string")),
            ]
        );
        let properties: Vec<(&str, Option<&str>)> = button
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.ty.as_deref()))
            .collect();
        assert_eq!(
            properties,
            vec![
                ("disabled", Some("boolean")),
                ("label", Some("string")),
                ("items", Some("array")),
                ("config", Some("object")),
            ]
        );
        assert_eq!(button.methods[0].name, "press");
        assert_eq!(button.methods[0].parameters, vec!["force"]);
        assert_eq!(button.events, vec!["org-press"]);
        assert_eq!(button.slots, vec!["", "icon"]);

        let card = &raws[1];
        assert_eq!(card.tag_name.as_deref(), Some("org-card"));
        assert_eq!(card.class_name.as_deref(), Some("OrgCard"));
    }

    #[test]
    fn test_manifest_number_attribute_is_left_for_extraction() {
        assert_eq!(normalize_attribute_type("number"), "number");
        assert_eq!(normalize_attribute_type("boolean | undefined"), "boolean");
        assert_eq!(normalize_property_type("string | number"), "object");
        assert_eq!(normalize_property_type("Array<string>"), "array");
        assert_eq!(normalize_property_type("1 | 2 | 3"), "number");
        assert_eq!(normalize_property_type("Array<string | number>"), "array");
        assert_eq!(normalize_property_type("(string | number)[]"), "array");
        assert_eq!(normalize_property_type("(string | number)[] | undefined"), "array");
        assert_eq!(normalize_property_type("(boolean)"), "boolean");
        assert_eq!(normalize_property_type("(() => void) | null"), "object");
        assert_eq!(normalize_attribute_type("(\"a\" | \"b\")"), "string");
    }

    #[test]
    fn test_invalid_manifest_json() {
        assert!(matches!(parse_manifest("{ not json"), Err(SourceError::Json(_))));
    }
}
