use thiserror::Error;

/// Nesting depth at which the flattener and resolver give up on a schema
/// graph instead of recursing further. Cyclic inline embeddings (a schema
/// containing itself through properties without a reference boundary) would
/// otherwise recurse forever.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Failures that indicate a defect in the flattening or naming pass itself,
/// not malformed user input. The document was already validated upstream, so
/// these abort the whole generation run; retrying would reproduce them
/// identically.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
  /// A property resolved to a named type that the flattener never recorded.
  #[error("no component [{model_name}] found by ref {ref_path:?}")]
  MissingComponent {
    model_name: String,
    ref_path: Option<String>,
  },

  /// A schema shape reached the scalar mapping that it cannot classify.
  #[error("not a simple type: {detail}")]
  UnexpectedShape { detail: String },

  /// An array's item schema could not be classified as scalar, shapeless,
  /// or a single-member allOf.
  #[error("not a simple array item type: {detail}")]
  UnexpectedArrayShape { detail: String },

  /// The schema graph nests deeper than [`MAX_NESTING_DEPTH`] levels.
  #[error("schema nesting exceeds {MAX_NESTING_DEPTH} levels at {context}")]
  NestingTooDeep { context: String },
}
