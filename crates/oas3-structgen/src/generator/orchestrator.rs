//! Orchestration of the generation pipeline
//!
//! Runs flatten -> resolve -> emit over an already-parsed document and
//! hands back rendered files plus run statistics. File-system writes stay
//! with the caller.

use std::collections::BTreeMap;

use super::{
  ast::ResolvedModel,
  code_generator::CodeGenerator,
  flattener::Flattener,
  naming::model_to_filename,
  schema_graph::SchemaGraph,
  schema_resolver::SchemaResolver,
};

/// Statistics about one generation run.
#[derive(Debug)]
pub struct GenerationStats {
  /// Entries recorded by the flattening pass
  pub flat_entries: usize,
  /// Models produced by the resolver
  pub models_resolved: usize,
}

pub struct Orchestrator {
  spec: oas3::Spec,
}

impl Orchestrator {
  pub fn new(spec: oas3::Spec) -> Self {
    Self { spec }
  }

  /// Resolves the document into models without rendering any source.
  pub fn resolve_models(&self) -> anyhow::Result<BTreeMap<String, ResolvedModel>> {
    let graph = SchemaGraph::new(self.spec.clone());
    let table = Flattener::new(&graph).flatten()?;
    SchemaResolver::new(&graph, &table).resolve()
  }

  /// Runs the full pipeline and returns `filename -> rendered source`,
  /// including the module index.
  pub fn generate(&self) -> anyhow::Result<(BTreeMap<String, String>, GenerationStats)> {
    let graph = SchemaGraph::new(self.spec.clone());
    let table = Flattener::new(&graph).flatten()?;
    let flat_entries = table.len();

    let models = SchemaResolver::new(&graph, &table).resolve()?;
    let generator = CodeGenerator::new();

    let mut files = BTreeMap::new();
    let mut index = Vec::new();

    for (name, model) in &models {
      let module_name = model_to_filename(name);
      files.insert(format!("{module_name}.rs"), generator.render_model(model)?);
      index.push((name.clone(), module_name));
    }

    let index_refs: Vec<(&String, &String)> = index.iter().map(|(model, module)| (model, module)).collect();
    files.insert("mod.rs".to_string(), generator.render_module_index(index_refs)?);

    let stats = GenerationStats {
      flat_entries,
      models_resolved: models.len(),
    };

    Ok((files, stats))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const PETSTORE_YAML: &str = r#"
openapi: 3.1.0
info:
  title: Petstore
  version: 1.0.0
paths: {}
components:
  schemas:
    Pet:
      type: object
      required: [name]
      properties:
        name:
          type: string
        tags:
          type: array
          items:
            type: string
        owner:
          $ref: '#/components/schemas/Owner'
        toys:
          type: array
          items:
            $ref: '#/components/schemas/Toy'
        home:
          type: object
          properties:
            city:
              type: string
    Owner:
      type: object
      properties:
        id:
          type: integer
    Toy:
      type: object
      properties:
        label:
          type: string
"#;

  fn petstore() -> oas3::Spec {
    oas3::from_yaml(PETSTORE_YAML).unwrap()
  }

  #[test]
  fn test_end_to_end_generation() {
    let (files, stats) = Orchestrator::new(petstore()).generate().unwrap();

    assert_eq!(stats.flat_entries, 4);
    assert_eq!(stats.models_resolved, 4);
    assert_eq!(
      files.keys().collect::<Vec<_>>(),
      vec!["mod.rs", "owner.rs", "pet.rs", "pet_home.rs", "toy.rs"]
    );

    let pet = &files["pet.rs"];
    assert!(pet.contains("pub struct Pet"));
    assert!(pet.contains("pub toys: Option<Vec<Toy>>"));
    assert!(pet.contains("pub tags: Option<Vec<String>>"));
    assert!(pet.contains("pub owner: Option<Owner>"));
    assert!(pet.contains("pub name: String"));
    assert!(pet.contains("pub home: Option<PetHome>"));

    assert!(files["mod.rs"].contains("pub use pet_home::PetHome;"));
  }

  #[test]
  fn test_resolve_models_matches_generate() {
    let orchestrator = Orchestrator::new(petstore());
    let models = orchestrator.resolve_models().unwrap();
    let (_, stats) = orchestrator.generate().unwrap();
    assert_eq!(models.len(), stats.models_resolved);
  }

  #[test]
  fn test_runs_are_deterministic() {
    let orchestrator = Orchestrator::new(petstore());
    let (first, _) = orchestrator.generate().unwrap();
    let (second, _) = orchestrator.generate().unwrap();
    assert_eq!(first, second);
  }
}
