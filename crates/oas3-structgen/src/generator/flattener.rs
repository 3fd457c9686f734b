//! Schema flattening
//!
//! Walks the schema graph of a document's top-level named schemas and
//! records every subtree that must become its own named type: reference
//! targets, inline objects at any nesting depth, and component schemas
//! whose own shape is object-like. Everything else collapses into scalar
//! or dynamic descriptors at resolution time.

use std::collections::{BTreeMap, BTreeSet};

use super::{
  error::{ConsistencyError, MAX_NESTING_DEPTH},
  naming::{embedded_model_name, ref_to_model_name, schema_to_model_name},
  schema_graph::{SchemaGraph, SchemaNode},
  utils::custom_type_target,
};
use oas3::spec::{ObjectOrReference, ObjectSchema};

/// Mapping from derived model name to the schema subtree defining it.
///
/// Uniqueness of keys holds by construction only: a later insert with the
/// same derived name silently replaces the earlier entry.
pub(crate) type FlatTable = BTreeMap<String, SchemaNode>;

pub(crate) struct Flattener<'a> {
  graph: &'a SchemaGraph,
}

impl<'a> Flattener<'a> {
  pub(crate) fn new(graph: &'a SchemaGraph) -> Self {
    Self { graph }
  }

  /// Produces the flat table for the document in two passes: first every
  /// top-level schema on its own, then a deep walk into each top-level
  /// candidate's properties and composition members.
  ///
  /// Each derived name's subtree is walked at most once per ref boundary,
  /// so reference cycles (a schema reachable from itself through `$ref`)
  /// terminate instead of recursing until the depth guard fires.
  pub(crate) fn flatten(&self) -> anyhow::Result<FlatTable> {
    let mut table = FlatTable::new();
    let mut visited = BTreeSet::new();

    for (schema_name, schema_ref) in self.graph.component_schemas() {
      let node = self.graph.materialize(schema_ref)?;
      self.collect_named("", schema_name, &node, &mut table)?;
    }

    for (schema_name, schema_ref) in self.graph.component_schemas() {
      let node = self.graph.materialize(schema_ref)?;
      let Some(target) = custom_type_target(self.graph, &node)? else {
        continue;
      };
      // the deep walk threads the derived name, so nested entries line up
      // with the names the resolver recomputes later
      let derived = derive_model_name("", schema_name, &target);
      visited.insert(derived.clone());
      self.collect_deep(&derived, &node, &mut table, &mut visited, 0)?;
    }

    Ok(table)
  }

  /// Tests one node for candidacy and, if it qualifies, inserts it under
  /// its derived name. Returns the derived name for recursion.
  fn collect_named(
    &self,
    parent_name: &str,
    field_name: &str,
    node: &SchemaNode,
    table: &mut FlatTable,
  ) -> anyhow::Result<Option<String>> {
    let Some(target) = custom_type_target(self.graph, node)? else {
      return Ok(None);
    };

    let model_name = derive_model_name(parent_name, field_name, &target);
    table.insert(model_name.clone(), target);

    Ok(Some(model_name))
  }

  fn collect_deep(
    &self,
    parent_name: &str,
    node: &SchemaNode,
    table: &mut FlatTable,
    visited: &mut BTreeSet<String>,
    depth: usize,
  ) -> anyhow::Result<()> {
    if depth > MAX_NESTING_DEPTH {
      return Err(
        ConsistencyError::NestingTooDeep {
          context: parent_name.to_string(),
        }
        .into(),
      );
    }

    let Some(target) = custom_type_target(self.graph, node)? else {
      return Ok(());
    };

    for (prop_name, prop_ref) in &target.schema.properties {
      let prop_node = self.graph.materialize(prop_ref)?;
      if let Some(derived) = self.collect_named(parent_name, prop_name, &prop_node, table)? {
        // a derived name already walked names the same subtree again,
        // which for a self-referential `$ref` would never terminate
        if visited.insert(derived.clone()) {
          self.collect_deep(&derived, &prop_node, table, visited, depth + 1)?;
        }
      }
    }

    // composition members of a multi-member list contribute to the same
    // named type rather than spawning their own, so they are walked under
    // the unchanged parent name
    let members = composition_members(&node.schema);
    if members.len() > 1 {
      for member in members {
        let member_node = self.graph.materialize(member)?;
        self.collect_deep(parent_name, &member_node, table, visited, depth + 1)?;
      }
    }

    Ok(())
  }
}

/// Naming rule for a candidate's *target* subtree, given its lexical parent
/// context. Reference targets name themselves; inline candidates embed the
/// singularized field name under the parent; top-level schemas singularize
/// their own declared name.
fn derive_model_name(parent_name: &str, field_name: &str, target: &SchemaNode) -> String {
  if let Some(ref_path) = &target.ref_path {
    return ref_to_model_name(ref_path);
  }

  if !parent_name.is_empty() {
    return embedded_model_name(parent_name, field_name);
  }

  schema_to_model_name(field_name)
}

/// Selects the composition member list the deep walk recurses into.
/// When several lists are declared, `anyOf` wins over `oneOf`, which wins
/// over `allOf`.
fn composition_members(schema: &ObjectSchema) -> &[ObjectOrReference<ObjectSchema>] {
  if !schema.any_of.is_empty() {
    &schema.any_of
  } else if !schema.one_of.is_empty() {
    &schema.one_of
  } else {
    &schema.all_of
  }
}
