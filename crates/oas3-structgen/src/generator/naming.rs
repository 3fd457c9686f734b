//! Model-name derivation for flattened schemas
//!
//! Names are collision-prone by design: the flat table keeps the last
//! writer for a derived name, so two subtrees that derive the same name
//! silently share one entry.

use inflections::Inflect;

/// Derives a model name from a `$ref` target.
///
/// External file references take the target file's base name, normalized to
/// PascalCase. In-document references (`#/components/schemas/X`) use the
/// final path segment verbatim: component names are assumed to already be
/// well-formed type names, so no case normalization is applied.
pub(crate) fn ref_to_model_name(ref_path: &str) -> String {
  if ref_path.ends_with("yaml") || ref_path.ends_with("yml") {
    return base_filename(ref_path).to_pascal_case();
  }

  ref_path.rsplit('/').next().unwrap_or(ref_path).to_string()
}

/// Derives a model name for a top-level schema from its declared name.
///
/// The declared name is singularized before case normalization, so a
/// component named `Users` becomes the `User` model.
pub(crate) fn schema_to_model_name(name: &str) -> String {
  cruet::to_singular(name).to_pascal_case()
}

/// Derives a model name for an object embedded inline under `parent_name`
/// at property `prop`, e.g. parent `Foo` with field `bars` names `FooBar`.
pub(crate) fn embedded_model_name(parent_name: &str, prop: &str) -> String {
  format!("{}_{}", parent_name, cruet::to_singular(prop)).to_pascal_case()
}

/// Derives the output module filename (without extension) for a model.
pub(crate) fn model_to_filename(model_name: &str) -> String {
  model_name.to_snake_case()
}

fn base_filename(path: &str) -> &str {
  let file = path.rsplit('/').next().unwrap_or(path);
  file.rsplit_once('.').map_or(file, |(stem, _)| stem)
}
