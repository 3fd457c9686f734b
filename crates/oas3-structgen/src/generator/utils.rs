//! Schema classification helpers shared by the flattener and the resolver
//!
//! The central question both passes keep asking is "does this subtree need
//! its own named type?". [`custom_type_target`] answers it: unwrap one
//! level of array, then reject scalars and shapeless schemas.

use oas3::spec::{ObjectSchema, SchemaType, SchemaTypeSet};

use super::{
  ast::ScalarKind,
  error::{ConsistencyError, MAX_NESTING_DEPTH},
  schema_graph::{SchemaGraph, SchemaNode},
};

/// Returns the subtree that must become a named type, or `None` when the
/// node collapses into a scalar or dynamic descriptor during resolution.
///
/// For array nodes the decision is made on the item schema; the returned
/// target is then the item subtree, not the array itself. A node whose sole
/// content is a single-member `allOf` is transparent: candidacy and naming
/// follow the member, so `allOf: [$ref X]` stays a direct reference to `X`
/// instead of synthesizing a wrapper type.
pub(crate) fn custom_type_target(graph: &SchemaGraph, node: &SchemaNode) -> anyhow::Result<Option<SchemaNode>> {
  custom_type_target_at(graph, node, 0)
}

fn custom_type_target_at(graph: &SchemaGraph, node: &SchemaNode, depth: usize) -> anyhow::Result<Option<SchemaNode>> {
  if depth > MAX_NESTING_DEPTH {
    return Err(
      ConsistencyError::NestingTooDeep {
        context: "allOf chain".to_string(),
      }
      .into(),
    );
  }

  let target = if is_array(&node.schema) {
    match graph.items_node(&node.schema)? {
      Some(items) => items,
      // no declared item shape, nothing to name
      None => return Ok(None),
    }
  } else {
    node.clone()
  };

  // refs are never unwrapped further: the reference boundary names them
  if target.ref_path.is_none() && is_sole_single_all_of(&target.schema) {
    let member = graph.materialize(&target.schema.all_of[0])?;
    return custom_type_target_at(graph, &member, depth + 1);
  }

  if scalar_kind(&target.schema).is_some() || is_shapeless(&target.schema) {
    return Ok(None);
  }

  Ok(Some(target))
}

/// True when the schema's only content is a one-member `allOf` list.
pub(crate) fn is_sole_single_all_of(schema: &ObjectSchema) -> bool {
  schema.all_of.len() == 1
    && schema.properties.is_empty()
    && schema.one_of.is_empty()
    && schema.any_of.is_empty()
}

/// A schema is shapeless when its concrete shape is not statically known:
/// it declares polymorphic alternatives, or it is object-like without any
/// declared properties. Shapeless schemas resolve to the dynamic
/// descriptor instead of becoming named types.
pub(crate) fn is_shapeless(schema: &ObjectSchema) -> bool {
  if !schema.one_of.is_empty() || !schema.any_of.is_empty() {
    return true;
  }

  if !schema.all_of.is_empty() {
    return false;
  }

  is_object_like(schema) && schema.properties.is_empty()
}

/// Object kind, including schemas that declare no type at all. A typeless,
/// composition-free schema can only describe an object shape.
fn is_object_like(schema: &ObjectSchema) -> bool {
  match single_non_null_type(schema) {
    Some(SchemaType::Object) => true,
    Some(_) => false,
    None => schema.schema_type.is_none(),
  }
}

pub(crate) fn is_array(schema: &ObjectSchema) -> bool {
  single_non_null_type(schema) == Some(SchemaType::Array)
}

/// Maps a scalar schema type to its descriptor kind.
pub(crate) fn scalar_kind(schema: &ObjectSchema) -> Option<ScalarKind> {
  match single_non_null_type(schema)? {
    SchemaType::String => Some(ScalarKind::String),
    SchemaType::Integer => Some(ScalarKind::Integer),
    SchemaType::Number => Some(ScalarKind::Number),
    SchemaType::Boolean => Some(ScalarKind::Boolean),
    _ => None,
  }
}

/// Nullability in the 3.1 model is a `null` member in the type set.
pub(crate) fn is_nullable(schema: &ObjectSchema) -> bool {
  match &schema.schema_type {
    Some(SchemaTypeSet::Single(typ)) => *typ == SchemaType::Null,
    Some(SchemaTypeSet::Multiple(types)) => types.contains(&SchemaType::Null),
    None => false,
  }
}

/// The declared type once a `null` marker is stripped from the set.
fn single_non_null_type(schema: &ObjectSchema) -> Option<SchemaType> {
  match &schema.schema_type {
    Some(SchemaTypeSet::Single(typ)) if *typ != SchemaType::Null => Some(*typ),
    Some(SchemaTypeSet::Multiple(types)) => {
      let mut non_null = types.iter().filter(|typ| **typ != SchemaType::Null);
      match (non_null.next(), non_null.next()) {
        (Some(typ), None) => Some(*typ),
        _ => None,
      }
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use oas3::spec::ObjectOrReference;

  use super::*;
  use crate::generator::tests_support::{array_of, object_with_props, scalar, spec_from_schemas};

  fn graph() -> SchemaGraph {
    SchemaGraph::new(spec_from_schemas([]))
  }

  fn inline(schema: ObjectSchema) -> SchemaNode {
    SchemaNode {
      ref_path: None,
      schema,
    }
  }

  #[test]
  fn test_scalars_are_never_candidates() {
    let graph = graph();
    for typ in [
      SchemaType::String,
      SchemaType::Integer,
      SchemaType::Number,
      SchemaType::Boolean,
    ] {
      let target = custom_type_target(&graph, &inline(scalar(typ))).unwrap();
      assert!(target.is_none(), "scalar {typ:?} should not be a candidate");
    }
  }

  #[test]
  fn test_object_with_properties_is_a_candidate() {
    let graph = graph();
    let schema = object_with_props([("name", scalar(SchemaType::String))]);
    let target = custom_type_target(&graph, &inline(schema)).unwrap();
    assert!(target.is_some());
  }

  #[test]
  fn test_property_less_object_is_shapeless() {
    let graph = graph();
    let schema = object_with_props([]);
    assert!(is_shapeless(&schema));
    assert!(custom_type_target(&graph, &inline(schema)).unwrap().is_none());
  }

  #[test]
  fn test_one_of_is_shapeless() {
    let mut schema = ObjectSchema::default();
    schema.one_of.push(ObjectOrReference::Object(scalar(SchemaType::String)));
    assert!(is_shapeless(&schema));
  }

  #[test]
  fn test_all_of_is_not_shapeless() {
    let mut schema = ObjectSchema::default();
    schema
      .all_of
      .push(ObjectOrReference::Object(object_with_props([("k", scalar(SchemaType::String))])));
    assert!(!is_shapeless(&schema));
  }

  #[test]
  fn test_array_candidacy_unwraps_items() {
    let graph = graph();

    let array_of_objects = array_of(object_with_props([("name", scalar(SchemaType::String))]));
    let target = custom_type_target(&graph, &inline(array_of_objects)).unwrap();
    assert!(target.is_some(), "array of objects names its item type");

    let array_of_strings = array_of(scalar(SchemaType::String));
    let target = custom_type_target(&graph, &inline(array_of_strings)).unwrap();
    assert!(target.is_none(), "array of scalars stays anonymous");
  }

  #[test]
  fn test_nullable_type_set() {
    let schema = ObjectSchema {
      schema_type: Some(SchemaTypeSet::Multiple(vec![SchemaType::String, SchemaType::Null])),
      ..Default::default()
    };
    assert!(is_nullable(&schema));
    assert_eq!(scalar_kind(&schema), Some(ScalarKind::String));
    assert!(!is_nullable(&scalar(SchemaType::String)));
  }
}
