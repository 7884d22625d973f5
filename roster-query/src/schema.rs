//! Schema descriptors and attribute introspection

use std::collections::BTreeMap;

/// Ordered set of attribute names that are valid for sorting and filtering a
/// record type.
///
/// `fields` never contains the primary key: the key is always sortable but
/// never a filter target, so it is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    name: &'static str,
    primary_key: &'static str,
    fields: &'static [&'static str],
}

impl SchemaDescriptor {
    pub const fn new(
        name: &'static str,
        primary_key: &'static str,
        fields: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            primary_key,
            fields,
        }
    }

    /// Record type name, used in error messages and cache keys
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// Declared fields in declaration order, primary key excluded
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Declared attributes with no options applied
    pub fn attributes(&self) -> Vec<String> {
        attributes_of(self, &AttributeOptions::default())
    }

    /// Whether `name` is the primary key (case-insensitive)
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.to_lowercase() == name.to_lowercase()
    }
}

/// Implemented by record types that expose a schema descriptor
pub trait Schema {
    fn schema() -> &'static SchemaDescriptor;

    /// Renames, exclusions and additions applied to the declared fields
    /// before they reach clients
    fn attribute_options() -> AttributeOptions {
        AttributeOptions::default()
    }

    /// Attribute names as clients see them, in declaration order
    fn exposed_attributes() -> Vec<String> {
        attributes_of(Self::schema(), &Self::attribute_options())
    }
}

/// Options for [`attributes_of`]
///
/// `replace` is applied before `exclude`, so exclusions name the renamed
/// attribute. `add` is appended after every declared attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributeOptions {
    pub exclude: Vec<String>,
    pub replace: BTreeMap<String, String>,
    pub add: Vec<String>,
}

impl AttributeOptions {
    /// Options that leave the declared fields untouched
    pub const NONE: AttributeOptions = AttributeOptions {
        exclude: Vec::new(),
        replace: BTreeMap::new(),
        add: Vec::new(),
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    pub fn replace(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.replace.insert(old.into(), new.into());
        self
    }

    pub fn add(mut self, name: impl Into<String>) -> Self {
        self.add.push(name.into());
        self
    }
}

/// Ordered attribute names of `schema` after applying `options`
pub fn attributes_of(schema: &SchemaDescriptor, options: &AttributeOptions) -> Vec<String> {
    let mut attributes: Vec<String> = schema
        .fields
        .iter()
        .map(|field| {
            options
                .replace
                .get(*field)
                .cloned()
                .unwrap_or_else(|| field.to_string())
        })
        .filter(|field| !options.exclude.iter().any(|excluded| excluded == field))
        .collect();

    for extra in &options.add {
        if !attributes.contains(extra) {
            attributes.push(extra.clone());
        }
    }

    attributes
}

/// Case-insensitive membership test against the declared attributes.
///
/// The primary key is never an attribute in this sense.
pub fn is_attribute(schema: &SchemaDescriptor, name: &str) -> bool {
    is_exposed_attribute(schema, &AttributeOptions::default(), name)
}

/// Case-insensitive membership test against `attributes_of(schema, options)`
pub fn is_exposed_attribute(schema: &SchemaDescriptor, options: &AttributeOptions, name: &str) -> bool {
    let wanted = name.to_lowercase();
    attributes_of(schema, options)
        .iter()
        .any(|attribute| attribute.to_lowercase() == wanted)
}
