//! Schema nodes
//!
//! A `Schema` describes a single JSON value: its kind, constraints, default,
//! examples and allowed values. Object schemas keep their properties in
//! declaration order so the catalogue renders the way it was written.

use serde::Serialize;
use serde_json::{json, Map, Value};

// ============================================================================
// Schema Kinds
// ============================================================================

/// Kind of JSON value a schema accepts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array {
        items: Box<Schema>,
    },
    Object {
        properties: Vec<Property>,
        #[serde(skip_serializing_if = "Option::is_none")]
        additional_properties: Option<Box<Schema>>,
    },
    /// Opaque passthrough, any JSON value is accepted
    Any,
    /// Exactly one of several shapes; used where a discriminator field
    /// (such as `status`) selects the variant
    #[serde(rename = "one_of")]
    OneOf {
        variants: Vec<Schema>,
    },
}

impl SchemaKind {
    /// JSON type name used in messages and JSON-Schema output
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            SchemaKind::String => Some("string"),
            SchemaKind::Number => Some("number"),
            SchemaKind::Integer => Some("integer"),
            SchemaKind::Boolean => Some("boolean"),
            SchemaKind::Array { .. } => Some("array"),
            SchemaKind::Object { .. } => Some("object"),
            SchemaKind::Any | SchemaKind::OneOf { .. } => None,
        }
    }
}

/// Named member of an object schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub required: bool,
    pub schema: Schema,
}

/// Length, size and numeric bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        *self == Constraints::default()
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Structural description of one JSON value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(flatten)]
    pub kind: SchemaKind,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            description: None,
            default: None,
            examples: Vec::new(),
            enumeration: None,
            constraints: Constraints::default(),
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    pub fn any() -> Self {
        Self::of(SchemaKind::Any)
    }

    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    /// Empty object schema, extended with `field` / `optional`
    pub fn object() -> Self {
        Self::of(SchemaKind::Object {
            properties: Vec::new(),
            additional_properties: None,
        })
    }

    /// Value matching one of `variants`
    pub fn union<I>(variants: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Self::of(SchemaKind::OneOf {
            variants: variants.into_iter().collect(),
        })
    }

    /// Object whose keys are free-form and whose values follow `values`
    pub fn map(values: Schema) -> Self {
        Self::of(SchemaKind::Object {
            properties: Vec::new(),
            additional_properties: Some(Box::new(values)),
        })
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Restrict the value to a fixed set
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.constraints.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.constraints.max_length = Some(n);
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.constraints.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.constraints.max_items = Some(n);
        self
    }

    pub fn minimum(mut self, min: f64) -> Self {
        self.constraints.minimum = Some(min);
        self
    }

    pub fn maximum(mut self, max: f64) -> Self {
        self.constraints.maximum = Some(max);
        self
    }

    /// Shorthand for an inclusive numeric range
    pub fn between(self, min: f64, max: f64) -> Self {
        self.minimum(min).maximum(max)
    }

    /// Add a required property (object schemas only)
    pub fn field(self, name: &str, schema: Schema) -> Self {
        self.property(name, true, schema)
    }

    /// Add an optional property (object schemas only)
    pub fn optional(self, name: &str, schema: Schema) -> Self {
        self.property(name, false, schema)
    }

    fn property(mut self, name: &str, required: bool, schema: Schema) -> Self {
        if let SchemaKind::Object { properties, .. } = &mut self.kind {
            properties.retain(|p| p.name != name);
            properties.push(Property {
                name: name.to_string(),
                required,
                schema,
            });
        }
        self
    }

    /// Append every property of `other` (both must be objects)
    pub fn extend(mut self, other: &Schema) -> Self {
        for property in other.properties() {
            self = self.property(&property.name, property.required, property.schema.clone());
        }
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn properties(&self) -> &[Property] {
        match &self.kind {
            SchemaKind::Object { properties, .. } => properties,
            _ => &[],
        }
    }

    pub fn property_schema(&self, name: &str) -> Option<&Schema> {
        self.properties()
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.schema)
    }

    /// Names of required properties, in declaration order
    pub fn required(&self) -> Vec<&str> {
        self.properties()
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Value a conforming document would most plausibly carry
    ///
    /// First example, else default, else a minimal value for the kind.
    pub fn sample(&self) -> Value {
        if let Some(example) = self.examples.first() {
            return example.clone();
        }
        if let Some(default) = &self.default {
            return default.clone();
        }
        if let Some(first) = self.enumeration.as_ref().and_then(|values| values.first()) {
            return first.clone();
        }
        match &self.kind {
            SchemaKind::String => {
                let len = self.constraints.min_length.unwrap_or(0);
                Value::String("x".repeat(len))
            }
            SchemaKind::Number | SchemaKind::Integer => {
                json!(self.constraints.minimum.map(|m| m as i64).unwrap_or(0))
            }
            SchemaKind::Boolean => Value::Bool(false),
            SchemaKind::Array { items } => {
                let len = self.constraints.min_items.unwrap_or(0);
                Value::Array((0..len).map(|_| items.sample()).collect())
            }
            SchemaKind::Object { properties, .. } => {
                let mut map = Map::new();
                for property in properties.iter().filter(|p| p.required) {
                    map.insert(property.name.clone(), property.schema.sample());
                }
                Value::Object(map)
            }
            SchemaKind::Any => Value::Null,
            SchemaKind::OneOf { variants } => {
                variants.first().map(Schema::sample).unwrap_or(Value::Null)
            }
        }
    }

    // ------------------------------------------------------------------------
    // JSON-Schema rendering
    // ------------------------------------------------------------------------

    /// Render as a JSON-Schema object (OpenAPI 3.1 dialect)
    pub fn to_json_schema(&self) -> Value {
        let mut out = Map::new();

        if let Some(type_name) = self.kind.type_name() {
            if self.nullable {
                out.insert("type".into(), json!([type_name, "null"]));
            } else {
                out.insert("type".into(), json!(type_name));
            }
        }

        match &self.kind {
            SchemaKind::Array { items } => {
                out.insert("items".into(), items.to_json_schema());
            }
            SchemaKind::Object {
                properties,
                additional_properties,
            } => {
                if !properties.is_empty() {
                    let rendered: Map<String, Value> = properties
                        .iter()
                        .map(|p| (p.name.clone(), p.schema.to_json_schema()))
                        .collect();
                    out.insert("properties".into(), Value::Object(rendered));
                    let required = self.required();
                    if !required.is_empty() {
                        out.insert("required".into(), json!(required));
                    }
                }
                if let Some(values) = additional_properties {
                    out.insert("additionalProperties".into(), values.to_json_schema());
                }
            }
            SchemaKind::OneOf { variants } => {
                let rendered: Vec<Value> = variants.iter().map(Schema::to_json_schema).collect();
                out.insert("oneOf".into(), Value::Array(rendered));
            }
            _ => {}
        }

        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(default) = &self.default {
            out.insert("default".into(), default.clone());
        }
        if !self.examples.is_empty() {
            out.insert("examples".into(), json!(self.examples));
        }
        if let Some(values) = &self.enumeration {
            out.insert("enum".into(), json!(values));
        }

        let c = &self.constraints;
        let bounds = [
            ("minLength", c.min_length.map(|v| json!(v))),
            ("maxLength", c.max_length.map(|v| json!(v))),
            ("minItems", c.min_items.map(|v| json!(v))),
            ("maxItems", c.max_items.map(|v| json!(v))),
            ("minimum", c.minimum.map(|v| json!(v))),
            ("maximum", c.maximum.map(|v| json!(v))),
        ];
        for (key, value) in bounds {
            if let Some(value) = value {
                out.insert(key.into(), value);
            }
        }

        Value::Object(out)
    }
}

// ============================================================================
// Tests
// ============================================================================
