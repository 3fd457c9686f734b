//! Intermediate representation of resolved schema models
//!
//! This module contains the types produced by the schema resolver and
//! consumed by code emission: per-model property lists with semantic type
//! descriptors and pass-through constraint metadata.

use oas3::spec::ObjectSchema;

/// Primitive JSON schema types that map directly to Rust primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
  String,
  Integer,
  Number,
  Boolean,
}

/// Semantic type of a resolved property.
///
/// `Dynamic` stands for a schema whose concrete shape is not statically
/// known (polymorphic `oneOf`/`anyOf` or a property-less object); emitters
/// pattern-match on it instead of introspecting at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
  /// A primitive value (string, integer, number, boolean)
  Scalar { kind: ScalarKind, nullable: bool },
  /// A reference to another flattened model by its derived name
  NamedRef { name: String, nullable: bool },
  /// A homogeneous list of the inner descriptor
  ListOf(Box<TypeDescriptor>),
  /// A value of unknown shape
  Dynamic { nullable: bool },
  /// A list whose elements have unknown shape
  DynamicList,
}

impl TypeDescriptor {
  pub fn scalar(kind: ScalarKind) -> Self {
    TypeDescriptor::Scalar { kind, nullable: false }
  }

  pub fn named(name: impl Into<String>) -> Self {
    TypeDescriptor::NamedRef {
      name: name.into(),
      nullable: false,
    }
  }

  pub fn list_of(inner: TypeDescriptor) -> Self {
    TypeDescriptor::ListOf(Box::new(inner))
  }
}

/// Validation metadata carried through from the schema, verbatim.
///
/// The resolver neither interprets nor enforces any of it; emitters may
/// render it into documentation or validation attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
  pub minimum: Option<serde_json::Number>,
  pub maximum: Option<serde_json::Number>,
  pub exclusive_minimum: Option<serde_json::Number>,
  pub exclusive_maximum: Option<serde_json::Number>,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub min_items: Option<u64>,
  pub max_items: Option<u64>,
  pub pattern: Option<String>,
  pub enum_values: Vec<serde_json::Value>,
}

impl ConstraintSet {
  pub fn from_schema(schema: &ObjectSchema) -> Self {
    Self {
      minimum: schema.minimum.clone(),
      maximum: schema.maximum.clone(),
      exclusive_minimum: schema.exclusive_minimum.clone(),
      exclusive_maximum: schema.exclusive_maximum.clone(),
      min_length: schema.min_length,
      max_length: schema.max_length,
      min_items: schema.min_items,
      max_items: schema.max_items,
      pattern: schema.pattern.clone(),
      enum_values: schema.enum_values.clone(),
    }
  }
}

/// One property of a resolved model, keyed by its declared schema name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
  pub name: String,
  pub descriptor: TypeDescriptor,
  pub required: bool,
  pub constraints: ConstraintSet,
}

/// A flattened schema resolved into a named list of typed properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
  pub name: String,
  pub properties: Vec<ResolvedProperty>,
}
