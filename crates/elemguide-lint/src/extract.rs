//! Turns raw definitions into [`ComponentDescriptor`]s.
//!
//! A [`RawDefinition`] is whatever a source format could recover about one
//! element: names and declared type text, nothing validated. [`extract`]
//! validates it and normalizes the types. See [`crate::source`] for the
//! formats that produce raw definitions.

use crate::descriptor::{AttributeType, ComponentDescriptor, PropertyType};
use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::HashMap;

/// Placeholder used in errors when a definition has no tag name.
pub const UNKNOWN_TAG: &str = "<unknown>";

/// An unvalidated element definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawDefinition {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<RawMember>,
    #[serde(default)]
    pub properties: Vec<RawMember>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub slots: Vec<String>,
    #[serde(default)]
    pub allow_reserved: Vec<String>,
    /// Class name, used to label definitions that lack a tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// File the definition was read from; set by the loader, not the document.
    #[serde(skip)]
    pub origin: Option<String>,
}

/// A named attribute or property with its declared type text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMember {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
}

impl RawMember {
    pub fn new(name: impl Into<String>, ty: Option<&str>) -> Self {
        Self {
            name: name.into(),
            ty: ty.map(str::to_string),
        }
    }
}

/// A method with either an explicit arity or a parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMethod {
    pub name: String,
    #[serde(default)]
    pub arity: Option<usize>,
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl RawMethod {
    fn arity(&self) -> usize {
        self.arity.unwrap_or(self.parameters.len())
    }
}

impl RawDefinition {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            ..Self::default()
        }
    }

    /// Name used for this definition in error messages.
    pub fn display_name(&self) -> String {
        match (&self.tag_name, &self.class_name) {
            (Some(tag), _) => tag.clone(),
            (None, Some(class)) => format!("{} (class {})", UNKNOWN_TAG, class),
            (None, None) => UNKNOWN_TAG.to_string(),
        }
    }
}

/// Validates a raw definition and produces its descriptor.
///
/// Fails with [`ExtractError::MalformedDefinition`] when the tag name is
/// missing or has no hyphen-delimited prefix, or when an attribute or
/// property type cannot be determined.
pub fn extract(raw: &RawDefinition) -> Result<ComponentDescriptor, ExtractError> {
    extract_inner(raw).map_err(|err| err.with_origin(raw.origin.clone()))
}

/// Splits repeated definitions of a tag from the first one.
///
/// A document can define each tag name once, so every later definition is
/// returned as malformed, naming where the tag was first defined.
pub fn reject_duplicate_tags(
    descriptors: Vec<ComponentDescriptor>,
) -> (Vec<ComponentDescriptor>, Vec<ExtractError>) {
    let mut first_seen: HashMap<String, Option<String>> = HashMap::new();
    let mut unique = Vec::with_capacity(descriptors.len());
    let mut duplicates = Vec::new();

    for descriptor in descriptors {
        match first_seen.get(&descriptor.tag_name) {
            Some(first) => {
                let reason = match first {
                    Some(source) => format!("tag is already defined in {}", source),
                    None => "tag is already defined".to_string(),
                };
                tracing::debug!(tag = %descriptor.tag_name, "duplicate definition");
                duplicates.push(
                    ExtractError::malformed(descriptor.tag_name.as_str(), reason)
                        .with_origin(descriptor.source.clone()),
                );
            }
            None => {
                first_seen.insert(descriptor.tag_name.clone(), descriptor.source.clone());
                unique.push(descriptor);
            }
        }
    }

    (unique, duplicates)
}

fn extract_inner(raw: &RawDefinition) -> Result<ComponentDescriptor, ExtractError> {
    let tag = raw
        .tag_name
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| ExtractError::malformed(raw.display_name(), "definition has no tag name"))?;

    match tag.split_once('-') {
        None => {
            return Err(ExtractError::malformed(
                tag,
                "tag name must contain a hyphen",
            ))
        }
        Some(("", _)) => {
            return Err(ExtractError::malformed(
                tag,
                "tag name must start with a prefix before the first hyphen",
            ))
        }
        Some(_) => {}
    }

    let mut descriptor = ComponentDescriptor::new(tag);
    descriptor.source = raw.origin.clone();

    for attribute in &raw.attributes {
        let ty = attribute
            .ty
            .as_deref()
            .ok_or_else(|| {
                ExtractError::malformed(
                    tag,
                    format!("attribute '{}' has no declared type", attribute.name),
                )
            })
            .and_then(|text| {
                AttributeType::parse(text).ok_or_else(|| {
                    ExtractError::malformed(
                        tag,
                        format!(
                            "attribute '{}' has type '{}'; attributes are boolean or string",
                            attribute.name, text
                        ),
                    )
                })
            })?;
        insert_typed(&mut descriptor.attributes, tag, "attribute", &attribute.name, ty)?;
    }

    for property in &raw.properties {
        let ty = property
            .ty
            .as_deref()
            .ok_or_else(|| {
                ExtractError::malformed(
                    tag,
                    format!("property '{}' has no declared type", property.name),
                )
            })
            .and_then(|text| {
                PropertyType::parse(text).ok_or_else(|| {
                    ExtractError::malformed(
                        tag,
                        format!("property '{}' has unrecognized type '{}'", property.name, text),
                    )
                })
            })?;
        insert_typed(&mut descriptor.properties, tag, "property", &property.name, ty)?;
    }

    for method in &raw.methods {
        if method.name.trim().is_empty() {
            return Err(ExtractError::malformed(tag, "method with an empty name"));
        }
        let arity = method.arity();
        match descriptor.methods.entry(method.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(arity);
            }
            Entry::Occupied(entry) if *entry.get() == arity => {}
            Entry::Occupied(entry) => {
                return Err(ExtractError::malformed(
                    tag,
                    format!(
                        "method '{}' is declared with both {} and {} parameters",
                        method.name,
                        entry.get(),
                        arity
                    ),
                ));
            }
        }
    }

    descriptor.events.extend(raw.events.iter().cloned());
    descriptor.slots = raw.slots.clone();
    descriptor
        .allow_reserved
        .extend(raw.allow_reserved.iter().cloned());

    tracing::trace!(tag, "extracted component descriptor");
    Ok(descriptor)
}

/// Inserts a typed member; a second declaration must agree with the first.
fn insert_typed<T: Copy + PartialEq + std::fmt::Display>(
    map: &mut std::collections::BTreeMap<String, T>,
    tag: &str,
    kind: &str,
    name: &str,
    ty: T,
) -> Result<(), ExtractError> {
    if name.trim().is_empty() {
        return Err(ExtractError::malformed(
            tag,
            format!("{} with an empty name", kind),
        ));
    }
    match map.entry(name.to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(ty);
            Ok(())
        }
        Entry::Occupied(entry) if *entry.get() == ty => Ok(()),
        Entry::Occupied(entry) => Err(ExtractError::malformed(
            tag,
            format!(
                "{} '{}' is declared as both {} and {}",
                kind,
                name,
                entry.get(),
                ty
            ),
        )),
    }
}
