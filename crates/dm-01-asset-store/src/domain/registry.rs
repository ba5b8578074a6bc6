//! # Variant Registry
//!
//! Declares every known asset kind and the shape of its fields.
//!
//! The registry is built once at startup and shared read-only (`Arc`) by the
//! codec, the service and the schema publisher. It is the only place that
//! decides whether a discriminator string names a known kind.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = VariantRegistry::builtin()?;
//! let spec = registry.lookup("type1")?;
//! assert_eq!(spec.kind, AssetKind::Document);
//! ```

use crate::domain::entities::{AssetKind, DISCRIMINATOR_FIELD, ID_FIELD};
use crate::domain::errors::{AssetError, RegistryError};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Largest integer magnitude an `f64` holds without rounding.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Semantic type of a variant field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// Any JSON number; held as `f64`.
    Number,
    Integer,
    Boolean,
}

impl FieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
        }
    }

    /// Whether `value` is convertible to this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Boolean => value.is_boolean(),
        }
    }

    /// Whether an accepted `value` reads back unchanged once held as this type.
    pub fn holds_exactly(&self, value: &Value) -> bool {
        match self {
            FieldType::Number => match (value.as_u64(), value.as_i64()) {
                (Some(n), _) => n <= MAX_EXACT_INTEGER,
                (None, Some(n)) => n.unsigned_abs() <= MAX_EXACT_INTEGER,
                (None, None) => true,
            },
            _ => true,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One declared field of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: &'static str,
}

/// Shape of one asset kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub kind: AssetKind,
    pub description: &'static str,
    pub required: Vec<FieldSpec>,
    pub optional: Vec<FieldSpec>,
}

impl VariantSpec {
    pub fn new(kind: AssetKind, description: &'static str) -> Self {
        Self {
            kind,
            description,
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    pub fn required(
        mut self,
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        self.required.push(FieldSpec {
            name,
            field_type,
            description,
        });
        self
    }

    pub fn optional(
        mut self,
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        self.optional.push(FieldSpec {
            name,
            field_type,
            description,
        });
        self
    }

    /// All declared fields, required first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.required.iter().chain(self.optional.iter())
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }

    /// Whether `name` is a declared (required or optional) field.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Registry of all known asset variants.
#[derive(Debug, Default)]
pub struct VariantRegistry {
    variants: BTreeMap<AssetKind, VariantSpec>,
}

impl VariantRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a fixed set of variants.
    pub fn with_variants(
        specs: impl IntoIterator<Item = VariantSpec>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Registry holding the built-in `type1` (document) and `type2` (payment)
    /// variants.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::with_variants(builtin_variants())
    }

    /// Register a variant.
    ///
    /// Rejects a kind that is already registered, a field that reuses a
    /// reserved name (`type`, `id`), a field declared twice, and any field
    /// set that differs from the typed shape of the kind. Decode builds the
    /// typed struct, so a declaration it cannot fill would make stored
    /// records unreadable.
    pub fn register(&mut self, spec: VariantSpec) -> Result<(), RegistryError> {
        if self.variants.contains_key(&spec.kind) {
            return Err(RegistryError::DuplicateKind {
                kind: spec.kind.as_str(),
            });
        }

        let mut seen = BTreeSet::new();
        for field in spec.fields() {
            if field.name == DISCRIMINATOR_FIELD || field.name == ID_FIELD {
                return Err(RegistryError::ReservedField { field: field.name });
            }
            if !seen.insert(field.name) {
                return Err(RegistryError::DuplicateField {
                    kind: spec.kind.as_str(),
                    field: field.name,
                });
            }
        }

        check_typed_shape(&spec)?;

        debug!(kind = %spec.kind, fields = seen.len(), "registered asset variant");
        self.variants.insert(spec.kind, spec);
        Ok(())
    }

    /// Resolve a discriminator string to its variant.
    pub fn lookup(&self, kind: &str) -> Result<&VariantSpec, AssetError> {
        self.variants
            .values()
            .find(|spec| spec.kind.as_str() == kind)
            .ok_or_else(|| AssetError::UnknownVariant {
                kind: kind.to_string(),
            })
    }

    /// Get the variant of an already-resolved kind.
    pub fn get(&self, kind: AssetKind) -> Option<&VariantSpec> {
        self.variants.get(&kind)
    }

    /// Set of known discriminator values.
    pub fn kinds(&self) -> BTreeSet<&'static str> {
        self.variants.keys().map(|k| k.as_str()).collect()
    }

    /// All registered variants in kind order.
    pub fn specs(&self) -> impl Iterator<Item = &VariantSpec> {
        self.variants.values()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Field layout of the typed struct behind each kind.
fn typed_shape(kind: AssetKind) -> VariantSpec {
    match kind {
        AssetKind::Document => VariantSpec::new(kind, "A named document asset")
            .required("name", FieldType::String, "The name of the asset")
            .optional("description", FieldType::String, "Free-form description"),
        AssetKind::Payment => VariantSpec::new(kind, "A payment asset")
            .required("amount", FieldType::Number, "Payment amount")
            .optional("currency", FieldType::String, "ISO 4217 currency code"),
    }
}

fn builtin_variants() -> [VariantSpec; 2] {
    AssetKind::ALL.map(typed_shape)
}

/// Descriptions and declaration order are free; names, types and
/// requiredness must match the typed struct.
fn check_typed_shape(spec: &VariantSpec) -> Result<(), RegistryError> {
    let shape = typed_shape(spec.kind);
    let mismatch = |field: &'static str, reason: &'static str| RegistryError::ShapeMismatch {
        kind: spec.kind.as_str(),
        field,
        reason,
    };

    for field in spec.fields() {
        let Some(expected) = shape.field(field.name) else {
            return Err(mismatch(field.name, "not a field of the typed asset"));
        };
        if expected.field_type != field.field_type {
            return Err(mismatch(field.name, "type differs from the typed asset"));
        }
    }

    for (declared, expected, reason) in [
        (&spec.required, &shape.required, "must be declared required"),
        (&spec.optional, &shape.optional, "must be declared optional"),
    ] {
        for field in expected {
            if !declared.iter().any(|f| f.name == field.name) {
                return Err(mismatch(field.name, reason));
            }
        }
    }

    Ok(())
}
