//! Schema resolution
//!
//! Consumes the flat table and produces one [`ResolvedModel`] per entry: a
//! named list of properties, each carrying a semantic type descriptor,
//! required/nullable flags, and raw constraint metadata.
//!
//! A named reference that cannot be found in the table is a defect in the
//! flattening pass and aborts the run; by the time resolution happens the
//! document itself has long been validated.

use std::collections::BTreeMap;

use oas3::spec::ObjectSchema;

use super::{
  ast::{ConstraintSet, ResolvedModel, ResolvedProperty, TypeDescriptor},
  error::{ConsistencyError, MAX_NESTING_DEPTH},
  flattener::FlatTable,
  naming::{embedded_model_name, ref_to_model_name},
  schema_graph::{SchemaGraph, SchemaNode},
  utils::{custom_type_target, is_array, is_nullable, is_shapeless, scalar_kind},
};

pub(crate) struct SchemaResolver<'a> {
  graph: &'a SchemaGraph,
  table: &'a FlatTable,
}

impl<'a> SchemaResolver<'a> {
  pub(crate) fn new(graph: &'a SchemaGraph, table: &'a FlatTable) -> Self {
    Self { graph, table }
  }

  /// Resolves every flat-table entry into a model.
  pub(crate) fn resolve(&self) -> anyhow::Result<BTreeMap<String, ResolvedModel>> {
    let mut models = BTreeMap::new();

    for (name, node) in self.table {
      models.insert(
        name.clone(),
        ResolvedModel {
          name: name.clone(),
          properties: self.build_properties(name, node)?,
        },
      );
    }

    Ok(models)
  }

  fn build_properties(&self, model_name: &str, node: &SchemaNode) -> anyhow::Result<Vec<ResolvedProperty>> {
    // requiredness is always consulted against the top node being
    // resolved; an allOf branch's own `required` list is never honored
    let outer_required = node.schema.required.clone();
    self.collect_properties(model_name, node, &outer_required, 0)
  }

  /// Collects the property list for one schema node. An `allOf` composition
  /// concatenates the properties of every member in declaration order, with
  /// no deduplication of names across members.
  fn collect_properties(
    &self,
    model_name: &str,
    node: &SchemaNode,
    outer_required: &[String],
    depth: usize,
  ) -> anyhow::Result<Vec<ResolvedProperty>> {
    if depth > MAX_NESTING_DEPTH {
      return Err(
        ConsistencyError::NestingTooDeep {
          context: model_name.to_string(),
        }
        .into(),
      );
    }

    let mut properties = Vec::new();

    if !node.schema.all_of.is_empty() {
      for member in &node.schema.all_of {
        let member_node = self.graph.materialize(member)?;
        properties.extend(self.collect_properties(model_name, &member_node, outer_required, depth + 1)?);
      }
    } else {
      for (prop_name, prop_ref) in &node.schema.properties {
        let prop_node = self.graph.materialize(prop_ref)?;
        properties.push(self.map_property(model_name, outer_required, prop_name, &prop_node)?);
      }
    }

    Ok(properties)
  }

  /// Resolves a single property into a typed, annotated entry.
  fn map_property(
    &self,
    parent_name: &str,
    outer_required: &[String],
    prop_name: &str,
    node: &SchemaNode,
  ) -> anyhow::Result<ResolvedProperty> {
    let descriptor = match custom_type_target(self.graph, node)? {
      None => self.map_simple_schema(&node.schema, 0)?,
      Some(target) => {
        let model_name = match &target.ref_path {
          Some(ref_path) => ref_to_model_name(ref_path),
          None => embedded_model_name(parent_name, prop_name),
        };

        if !self.table.contains_key(&model_name) {
          return Err(
            ConsistencyError::MissingComponent {
              model_name,
              ref_path: target.ref_path.clone(),
            }
            .into(),
          );
        }

        if is_array(&node.schema) {
          TypeDescriptor::list_of(TypeDescriptor::named(model_name))
        } else {
          TypeDescriptor::NamedRef {
            name: model_name,
            nullable: is_nullable(&node.schema),
          }
        }
      }
    };

    Ok(ResolvedProperty {
      name: prop_name.to_string(),
      descriptor,
      required: outer_required.iter().any(|required| required == prop_name),
      constraints: ConstraintSet::from_schema(&node.schema),
    })
  }

  /// Maps a non-candidate schema to a scalar, dynamic, or list descriptor.
  ///
  /// A non-scalar, non-shapeless array item would have been classified as a
  /// named-type candidate upstream, so hitting one here means the
  /// flattening pass and this mapping disagree about the schema's shape.
  fn map_simple_schema(&self, schema: &ObjectSchema, depth: usize) -> anyhow::Result<TypeDescriptor> {
    if depth > MAX_NESTING_DEPTH {
      return Err(
        ConsistencyError::NestingTooDeep {
          context: "allOf chain".to_string(),
        }
        .into(),
      );
    }

    if let Some(kind) = scalar_kind(schema) {
      return Ok(TypeDescriptor::Scalar {
        kind,
        nullable: is_nullable(schema),
      });
    }

    if is_shapeless(schema) {
      return Ok(TypeDescriptor::Dynamic { nullable: true });
    }

    if schema.all_of.len() == 1 {
      let member = self.graph.materialize(&schema.all_of[0])?;
      return self.map_simple_schema(&member.schema, depth + 1);
    }

    if is_array(schema) {
      let Some(items) = self.graph.items_node(schema)? else {
        return Ok(TypeDescriptor::DynamicList);
      };

      if let Some(kind) = scalar_kind(&items.schema) {
        // item-level nullability is dropped on this path
        return Ok(TypeDescriptor::list_of(TypeDescriptor::scalar(kind)));
      }

      if is_shapeless(&items.schema) {
        return Ok(TypeDescriptor::DynamicList);
      }

      if items.schema.all_of.len() == 1 {
        let member = self.graph.materialize(&items.schema.all_of[0])?;
        return self.map_simple_schema(&member.schema, depth + 1);
      }

      return Err(
        ConsistencyError::UnexpectedArrayShape {
          detail: format!("{:?}", items.schema.schema_type),
        }
        .into(),
      );
    }

    Err(
      ConsistencyError::UnexpectedShape {
        detail: format!("{:?}", schema.schema_type),
      }
      .into(),
    )
  }
}
