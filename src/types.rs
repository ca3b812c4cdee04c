//! Terraform value types and their variable type expressions.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Map => "map",
        }
    }
}

/// Object type with the subset of fields that may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectType {
    pub fields: BTreeMap<String, ValueType>,
    pub optional: BTreeSet<String>,
}

impl ObjectType {
    pub fn is_optional(&self, field: &str) -> bool {
        self.optional.contains(field)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
    String,
    Number,
    Bool,
    Dynamic,
    Collection(CollectionKind, Box<ValueType>),
    Object(ObjectType),
}

impl ValueType {
    /// Parses the cty JSON encoding of a type.
    pub fn parse(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(t) => match t.as_str() {
                "string" => Ok(ValueType::String),
                "number" => Ok(ValueType::Number),
                "bool" => Ok(ValueType::Bool),
                "dynamic" => Ok(ValueType::Dynamic),
                _ => Err(Error::unsupported_type(field, value)),
            },
            Value::Array(t) => {
                let kind = t.first().and_then(Value::as_str);
                match (kind, t.get(1)) {
                    (Some("list"), Some(element)) => {
                        Self::collection(CollectionKind::List, field, element)
                    }
                    (Some("set"), Some(element)) => {
                        Self::collection(CollectionKind::Set, field, element)
                    }
                    (Some("map"), Some(element)) => {
                        Self::collection(CollectionKind::Map, field, element)
                    }
                    (Some("object"), Some(Value::Object(attrs))) => {
                        let fields = attrs
                            .iter()
                            .map(|(name, t)| Self::parse(field, t).map(|t| (name.clone(), t)))
                            .collect::<Result<BTreeMap<_, _>>>()?;
                        let optional = match t.get(2) {
                            Some(Value::Array(names)) => names
                                .iter()
                                .filter_map(Value::as_str)
                                .map(String::from)
                                .collect(),
                            _ => BTreeSet::new(),
                        };
                        Ok(ValueType::Object(ObjectType { fields, optional }))
                    }
                    _ => Err(Error::unsupported_type(field, value)),
                }
            }
            unknown => Err(Error::unsupported_type(field, unknown)),
        }
    }

    fn collection(kind: CollectionKind, field: &str, element: &Value) -> Result<Self> {
        let element = Self::parse(field, element)?;
        Ok(ValueType::Collection(kind, Box::new(element)))
    }

    /// The object shape behind an object or a collection of objects, with the
    /// collection kind if any.
    pub fn as_structural(&self) -> Option<(Option<CollectionKind>, &ObjectType)> {
        match self {
            ValueType::Object(object) => Some((None, object)),
            ValueType::Collection(kind, element) => match element.as_ref() {
                ValueType::Object(object) => Some((Some(*kind), object)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Variable type expression, e.g. `set(object({port = number}))`.
    pub fn type_expr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Number => write!(f, "number"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Dynamic => write!(f, "any"),
            ValueType::Collection(kind, element) => write!(f, "{}({})", kind.as_str(), element),
            ValueType::Object(object) => {
                let fields = object
                    .fields
                    .iter()
                    .map(|(name, t)| {
                        if object.is_optional(name) {
                            format!("{} = optional({})", name, t)
                        } else {
                            format!("{} = {}", name, t)
                        }
                    })
                    .collect::<Vec<_>>();
                write!(f, "object({{{}}})", fields.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn resolve(value: Value) -> Result<ValueType> {
        ValueType::parse("azurerm_container_group.exposed_port", &value)
    }

    #[test]
    fn test_primitives() {
        assert_eq!(resolve(json!("string")).unwrap().type_expr(), "string");
        assert_eq!(resolve(json!("number")).unwrap().type_expr(), "number");
        assert_eq!(resolve(json!("bool")).unwrap().type_expr(), "bool");
    }

    #[test]
    fn test_dynamic_type_should_be_generated_as_any() {
        assert_eq!(resolve(json!("dynamic")).unwrap().type_expr(), "any");
    }

    #[test]
    fn test_collections_keep_their_kind() {
        assert_eq!(
            resolve(json!(["set", "string"])).unwrap().type_expr(),
            "set(string)"
        );
        assert_eq!(
            resolve(json!(["map", ["list", "number"]])).unwrap().type_expr(),
            "map(list(number))"
        );
    }

    #[test]
    fn test_object_type_in_attributes() {
        let t = resolve(json!(["set", ["object", {"protocol": "string", "port": "number"}]]))
            .unwrap();
        assert_eq!(
            t.type_expr(),
            "set(object({port = number, protocol = string}))"
        );
        assert_eq!(
            t.type_expr().replace(' ', ""),
            "set(object({port=number,protocol=string}))"
        );
    }

    #[test]
    fn test_object_optional_fields() {
        let t = resolve(json!(["object", {"foo": "string", "bar": "bool"}, ["foo"]])).unwrap();
        assert_eq!(t.type_expr(), "object({bar = bool, foo = optional(string)})");
        match t {
            ValueType::Object(object) => {
                assert!(object.is_optional("foo"));
                assert!(!object.is_optional("bar"));
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_structural_detection() {
        let object = resolve(json!(["object", {"a": "string"}])).unwrap();
        assert!(matches!(object.as_structural(), Some((None, _))));
        let set = resolve(json!(["set", ["object", {"a": "string"}]])).unwrap();
        assert!(matches!(
            set.as_structural(),
            Some((Some(CollectionKind::Set), _))
        ));
        let nested = resolve(json!(["list", ["list", ["object", {"a": "string"}]]])).unwrap();
        assert!(nested.as_structural().is_none());
        assert!(resolve(json!("dynamic")).unwrap().as_structural().is_none());
    }

    #[test]
    fn test_unsupported_types() {
        let err = resolve(json!(["tuple", ["string", "number"]])).unwrap_err();
        match err {
            Error::UnsupportedType { field, type_desc } => {
                assert_eq!(field, "azurerm_container_group.exposed_port");
                assert!(type_desc.contains("tuple"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(resolve(json!("float")).is_err());
        assert!(resolve(json!(["list"])).is_err());
        assert!(resolve(json!(42)).is_err());
    }
}
