//! Normalized description of one custom element definition.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Declared type of an HTML attribute.
///
/// Attributes only ever carry strings; a boolean attribute is one whose
/// presence is the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Boolean,
    String,
}

impl AttributeType {
    /// Parses a declared type name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Some(AttributeType::Boolean),
            "string" => Some(AttributeType::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Boolean => "boolean",
            AttributeType::String => "string",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a JavaScript property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
    String,
    Number,
    Object,
    Array,
}

impl PropertyType {
    /// Parses a declared type name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Some(PropertyType::Boolean),
            "string" => Some(PropertyType::String),
            "number" | "bigint" => Some(PropertyType::Number),
            "object" => Some(PropertyType::Object),
            "array" => Some(PropertyType::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Boolean => "boolean",
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Object => "object",
            PropertyType::Array => "array",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One custom element definition, normalized for rule checks.
///
/// Built by [`crate::extract`]; tests and embedders may also build one
/// directly with [`ComponentDescriptor::new`] and the `with_*` builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Registered tag name, e.g. `acme-button`.
    pub tag_name: String,
    /// Observed attributes and their declared types.
    pub attributes: BTreeMap<String, AttributeType>,
    /// Public properties and their declared types.
    pub properties: BTreeMap<String, PropertyType>,
    /// Public methods and their arity.
    pub methods: BTreeMap<String, usize>,
    /// Event names the element dispatches.
    pub events: BTreeSet<String>,
    /// Slot names in template order. Empty means only the default slot;
    /// an empty string is the unnamed slot.
    pub slots: Vec<String>,
    /// Member names allowed to shadow reserved element members.
    pub allow_reserved: BTreeSet<String>,
    /// Where the definition was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ComponentDescriptor {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    /// Text before the first hyphen of the tag name, if the tag has one.
    pub fn prefix(&self) -> Option<&str> {
        self.tag_name
            .split_once('-')
            .map(|(prefix, _)| prefix)
            .filter(|prefix| !prefix.is_empty())
    }

    /// Label used in reports: the tag name, plus its source when known.
    pub fn label(&self) -> String {
        match &self.source {
            Some(source) => format!("{} ({})", self.tag_name, source),
            None => self.tag_name.clone(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, ty: AttributeType) -> Self {
        self.attributes.insert(name.into(), ty);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.properties.insert(name.into(), ty);
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, arity: usize) -> Self {
        self.methods.insert(name.into(), arity);
        self
    }

    pub fn with_event(mut self, name: impl Into<String>) -> Self {
        self.events.insert(name.into());
        self
    }

    pub fn with_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots = slots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allow_reserved(mut self, name: impl Into<String>) -> Self {
        self.allow_reserved.insert(name.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attribute, property and method names, each tagged with its kind.
    pub fn members(&self) -> impl Iterator<Item = (MemberKind, &str)> + '_ {
        let attributes = self
            .attributes
            .keys()
            .map(|name| (MemberKind::Attribute, name.as_str()));
        let properties = self
            .properties
            .keys()
            .map(|name| (MemberKind::Property, name.as_str()));
        let methods = self
            .methods
            .keys()
            .map(|name| (MemberKind::Method, name.as_str()));
        attributes.chain(properties).chain(methods)
    }
}

/// Kind of public member on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Attribute,
    Property,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemberKind::Attribute => "attribute",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
        })
    }
}
