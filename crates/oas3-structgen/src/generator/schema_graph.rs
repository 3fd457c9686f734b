//! Access layer over the parsed OpenAPI document
//!
//! The document arrives already validated; this module only exposes its
//! top-level named schemas and resolves in-document references so the
//! flattener and resolver can walk plain schema values.

use anyhow::Context;
use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema},
};

/// A schema subtree paired with the `$ref` it was reached through, if any.
///
/// Mirrors the shape the walk needs everywhere: the reference string drives
/// naming, the resolved value drives classification.
#[derive(Debug, Clone)]
pub struct SchemaNode {
  pub ref_path: Option<String>,
  pub schema: ObjectSchema,
}

/// Read-only view of the schemas declared under `components/schemas`.
#[derive(Debug)]
pub struct SchemaGraph {
  spec: Spec,
}

impl SchemaGraph {
  pub fn new(spec: Spec) -> Self {
    Self { spec }
  }

  /// Iterates the top-level named schemas in declared-name order.
  pub fn component_schemas(&self) -> impl Iterator<Item = (&String, &ObjectOrReference<ObjectSchema>)> {
    self
      .spec
      .components
      .iter()
      .flat_map(|components| components.schemas.iter())
  }

  /// Materializes a schema reference into a [`SchemaNode`], resolving
  /// in-document pointers against the spec. Unresolvable pointers are a
  /// document-loading problem, not an internal one.
  pub fn materialize(&self, schema_ref: &ObjectOrReference<ObjectSchema>) -> anyhow::Result<SchemaNode> {
    match schema_ref {
      ObjectOrReference::Object(schema) => Ok(SchemaNode {
        ref_path: None,
        schema: schema.clone(),
      }),
      ObjectOrReference::Ref { ref_path, .. } => {
        let schema = schema_ref
          .resolve(&self.spec)
          .with_context(|| format!("failed to resolve schema reference {ref_path}"))?;
        Ok(SchemaNode {
          ref_path: Some(ref_path.clone()),
          schema,
        })
      }
    }
  }

  /// Materializes the item schema of an array node, when one is declared.
  /// Boolean item schemas (`items: true`/`false`) carry no shape and yield
  /// `None`, as does a missing `items`.
  pub fn items_node(&self, schema: &ObjectSchema) -> anyhow::Result<Option<SchemaNode>> {
    match schema.items.as_deref() {
      Some(Schema::Object(items_ref)) => Ok(Some(self.materialize(items_ref)?)),
      Some(Schema::Boolean(_)) | None => Ok(None),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::tests_support::{make_ref, spec_from_schemas};

  #[test]
  fn test_materialize_resolves_in_document_refs() {
    let mut banana = ObjectSchema::default();
    banana.properties.insert(
      "color".to_string(),
      ObjectOrReference::Object(ObjectSchema {
        schema_type: Some(oas3::spec::SchemaTypeSet::Single(oas3::spec::SchemaType::String)),
        ..Default::default()
      }),
    );

    let spec = spec_from_schemas([("Banana".to_string(), banana)]);
    let graph = SchemaGraph::new(spec);

    let node = graph.materialize(&make_ref("Banana")).unwrap();
    assert_eq!(node.ref_path.as_deref(), Some("#/components/schemas/Banana"));
    assert!(node.schema.properties.contains_key("color"));
  }

  #[test]
  fn test_materialize_keeps_inline_schemas_unreferenced() {
    let graph = SchemaGraph::new(spec_from_schemas([]));
    let node = graph
      .materialize(&ObjectOrReference::Object(ObjectSchema::default()))
      .unwrap();
    assert_eq!(node.ref_path, None);
  }
}
