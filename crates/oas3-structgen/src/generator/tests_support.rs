//! Shared fixture builders for generator tests.

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet},
};
use serde_json::json;

pub(crate) fn spec_from_schemas(schemas: impl IntoIterator<Item = (String, ObjectSchema)>) -> Spec {
  let mut spec_json = json!({
    "openapi": "3.1.0",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": {},
    "components": { "schemas": {} }
  });

  let schemas_obj = spec_json["components"]["schemas"].as_object_mut().unwrap();
  for (name, schema) in schemas {
    schemas_obj.insert(name, serde_json::to_value(schema).unwrap());
  }

  serde_json::from_value(spec_json).unwrap()
}

pub(crate) fn make_ref(name: &str) -> ObjectOrReference<ObjectSchema> {
  ObjectOrReference::Ref {
    ref_path: format!("#/components/schemas/{name}"),
    summary: None,
    description: None,
  }
}

pub(crate) fn scalar(typ: SchemaType) -> ObjectSchema {
  ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(typ)),
    ..Default::default()
  }
}

pub(crate) fn nullable_scalar(typ: SchemaType) -> ObjectSchema {
  ObjectSchema {
    schema_type: Some(SchemaTypeSet::Multiple(vec![typ, SchemaType::Null])),
    ..Default::default()
  }
}

pub(crate) fn object_with_props<'a>(props: impl IntoIterator<Item = (&'a str, ObjectSchema)>) -> ObjectSchema {
  let mut schema = ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(SchemaType::Object)),
    ..Default::default()
  };
  for (name, prop) in props {
    schema
      .properties
      .insert(name.to_string(), ObjectOrReference::Object(prop));
  }
  schema
}

pub(crate) fn array_of(items: ObjectSchema) -> ObjectSchema {
  array_of_ref(ObjectOrReference::Object(items))
}

pub(crate) fn array_of_ref(items: ObjectOrReference<ObjectSchema>) -> ObjectSchema {
  ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(SchemaType::Array)),
    items: Some(Box::new(Schema::Object(Box::new(items)))),
    ..Default::default()
  }
}
