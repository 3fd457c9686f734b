use any_ascii::any_ascii;
use inflections::Inflect;

/// All strict and reserved keywords in Rust.
const RUST_KEYWORDS: &[&str] = &[
  "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
  "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
  "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box",
  "do", "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Convert a declared property name to a valid Rust field identifier.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  let sanitized = name.replace(['.', '/', ' ', '-'], "_");
  let cleaned = any_ascii(&sanitized).to_snake_case();

  // `self` cannot take the r# prefix
  if cleaned == "self" {
    return format!("{cleaned}_");
  }

  RUST_KEYWORDS
    .iter()
    .find(|&&kw| kw == cleaned)
    .map(|_| format!("r#{cleaned}"))
    .unwrap_or(cleaned)
}

/// Convert a derived model name to a valid Rust type name (PascalCase).
///
/// Splitting on underscores keeps verbatim in-document component names like
/// `snake_case` emittable without touching already-well-formed ones.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let cleaned = name
    .split(['_', '-', '.', ' '])
    .filter(|part| !part.is_empty())
    .map(|part| any_ascii(part).to_pascal_case())
    .collect::<Vec<_>>()
    .join("");

  match cleaned.as_str() {
    // `Self` cannot take the r# prefix
    "Self" => "SelfType".to_string(),
    "Clone" | "Copy" | "Display" | "Send" | "Sync" | "Type" | "Vec" => format!("r#{cleaned}"),
    _ => cleaned,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_keywords_are_escaped() {
    assert_eq!(to_rust_field_name("type"), "r#type");
    assert_eq!(to_rust_field_name("self"), "self_");
    assert_eq!(to_rust_field_name("name"), "name");
  }

  #[test]
  fn test_field_names_are_snake_cased() {
    assert_eq!(to_rust_field_name("homeAddress"), "home_address");
    assert_eq!(to_rust_field_name("x-rate-limit"), "x_rate_limit");
  }

  #[test]
  fn test_type_names_are_pascal_cased() {
    assert_eq!(to_rust_type_name("CreateUser"), "CreateUser");
    assert_eq!(to_rust_type_name("snake_case"), "SnakeCase");
  }

  #[test]
  fn test_reserved_type_names_are_escaped() {
    assert_eq!(to_rust_type_name("Vec"), "r#Vec");
    assert_eq!(to_rust_type_name("Type"), "r#Type");
    // r#Self is not a legal raw identifier, so it gets a suffix instead
    assert_eq!(to_rust_type_name("Self"), "SelfType");
    assert_eq!(to_rust_type_name("self"), "SelfType");
  }
}
