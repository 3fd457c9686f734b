pub(crate) mod ast;
pub(crate) mod code_generator;
pub(crate) mod error;
pub(crate) mod flattener;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod schema_graph;
pub(crate) mod schema_resolver;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod tests_support;
