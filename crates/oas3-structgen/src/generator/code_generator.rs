//! Rust source emission for resolved models
//!
//! Lowers every [`ResolvedModel`] into a serde-annotated struct definition,
//! one file per model plus a module index. Constraint metadata is rendered
//! into field documentation only; nothing here enforces it.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};

use super::ast::{ConstraintSet, ResolvedModel, ResolvedProperty, ScalarKind, TypeDescriptor};
use crate::reserved::{to_rust_field_name, to_rust_type_name};

const GENERATED_HEADER: &str = "// Generated by oas3-structgen. Do not edit.\n\n";

pub(crate) struct CodeGenerator;

impl CodeGenerator {
  pub(crate) fn new() -> Self {
    Self
  }

  /// Renders one model into a formatted source file.
  pub(crate) fn render_model(&self, model: &ResolvedModel) -> anyhow::Result<String> {
    let mut properties = model.properties.clone();
    // field order matches the reference emitter: descending by name
    properties.sort_by(|a, b| b.name.cmp(&a.name));

    let name = format_ident!("{}", to_rust_type_name(&model.name));
    let fields: Vec<TokenStream> = properties.iter().map(render_field).collect();

    let tokens = quote! {
      use super::*;

      #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
      pub struct #name {
        #(#fields)*
      }
    };

    let file = syn::parse2::<syn::File>(tokens)?;
    Ok(format!("{GENERATED_HEADER}{}", prettyplease::unparse(&file)))
  }

  /// Renders the module index declaring and re-exporting every model file.
  pub(crate) fn render_module_index<'a>(
    &self,
    entries: impl IntoIterator<Item = (&'a String, &'a String)>,
  ) -> anyhow::Result<String> {
    let declarations: Vec<TokenStream> = entries
      .into_iter()
      .map(|(model_name, module_name)| {
        let module = format_ident!("{module_name}");
        let type_name = format_ident!("{}", to_rust_type_name(model_name));
        quote! {
          pub mod #module;
          pub use #module::#type_name;
        }
      })
      .collect();

    let file = syn::parse2::<syn::File>(quote! { #(#declarations)* })?;
    Ok(format!("{GENERATED_HEADER}{}", prettyplease::unparse(&file)))
  }
}

fn render_field(prop: &ResolvedProperty) -> TokenStream {
  let field_name = to_rust_field_name(&prop.name);
  let ident = field_ident(&field_name);

  let (base_type, already_optional) = type_tokens(&prop.descriptor);
  let optional = !prop.required && !already_optional;
  let field_type = if optional {
    quote! { Option<#base_type> }
  } else {
    base_type
  };

  let docs = constraint_docs(&prop.constraints);
  let mut attrs = Vec::new();
  if field_name.trim_start_matches("r#") != prop.name {
    let declared = &prop.name;
    attrs.push(quote! { #[serde(rename = #declared)] });
  }
  if optional || already_optional {
    attrs.push(quote! { #[serde(skip_serializing_if = "Option::is_none")] });
  }

  quote! {
    #(#[doc = #docs])*
    #(#attrs)*
    pub #ident: #field_type,
  }
}

fn field_ident(name: &str) -> Ident {
  match name.strip_prefix("r#") {
    Some(raw) => Ident::new_raw(raw, Span::call_site()),
    None => format_ident!("{name}"),
  }
}

/// Lowers a descriptor to its Rust type. The flag reports whether the type
/// is already `Option`-wrapped, so optional fields are not wrapped twice.
fn type_tokens(descriptor: &TypeDescriptor) -> (TokenStream, bool) {
  match descriptor {
    TypeDescriptor::Scalar { kind, nullable } => wrap_nullable(*nullable, scalar_tokens(*kind)),
    TypeDescriptor::NamedRef { name, nullable } => {
      let type_name = format_ident!("{}", to_rust_type_name(name));
      wrap_nullable(*nullable, quote! { #type_name })
    }
    TypeDescriptor::ListOf(inner) => {
      let (item_type, _) = type_tokens(inner);
      (quote! { Vec<#item_type> }, false)
    }
    TypeDescriptor::Dynamic { nullable } => wrap_nullable(*nullable, quote! { serde_json::Value }),
    TypeDescriptor::DynamicList => (quote! { Vec<serde_json::Value> }, false),
  }
}

fn wrap_nullable(nullable: bool, base: TokenStream) -> (TokenStream, bool) {
  if nullable {
    (quote! { Option<#base> }, true)
  } else {
    (base, false)
  }
}

fn scalar_tokens(kind: ScalarKind) -> TokenStream {
  match kind {
    ScalarKind::String => quote! { String },
    ScalarKind::Integer => quote! { i64 },
    ScalarKind::Number => quote! { f64 },
    ScalarKind::Boolean => quote! { bool },
  }
}

fn constraint_docs(constraints: &ConstraintSet) -> Vec<String> {
  let mut docs = Vec::new();

  if let Some(pattern) = &constraints.pattern {
    docs.push(format!("Pattern: `{pattern}`"));
  }
  if let Some(min) = &constraints.minimum {
    docs.push(format!("Minimum: {min}"));
  }
  if let Some(max) = &constraints.maximum {
    docs.push(format!("Maximum: {max}"));
  }
  if let Some(min) = &constraints.exclusive_minimum {
    docs.push(format!("Exclusive minimum: {min}"));
  }
  if let Some(max) = &constraints.exclusive_maximum {
    docs.push(format!("Exclusive maximum: {max}"));
  }
  if constraints.min_length.is_some() || constraints.max_length.is_some() {
    docs.push(format!(
      "Length: {}..{}",
      constraints.min_length.map(|v| v.to_string()).unwrap_or_default(),
      constraints.max_length.map(|v| v.to_string()).unwrap_or_default()
    ));
  }
  if constraints.min_items.is_some() || constraints.max_items.is_some() {
    docs.push(format!(
      "Items: {}..{}",
      constraints.min_items.map(|v| v.to_string()).unwrap_or_default(),
      constraints.max_items.map(|v| v.to_string()).unwrap_or_default()
    ));
  }
  if !constraints.enum_values.is_empty() {
    let values: Vec<String> = constraints.enum_values.iter().map(|v| v.to_string()).collect();
    docs.push(format!("Allowed values: {}", values.join(", ")));
  }

  docs
}
