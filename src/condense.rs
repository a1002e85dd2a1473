//! Schema condensation
//!
//! Walks a JSON Schema document and keeps only what a reader (or a language
//! model) needs to understand it: descriptions, the property/items nesting
//! and any extension keys. Validation keywords are dropped and local `$ref`
//! nodes are replaced by the condensation of their target.
//!
//! ```
//! use schema_condense::condense_schema;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "owner": { "$ref": "#/definitions/User" },
//!         "tags": { "type": "array", "items": { "description": "A tag" } }
//!     },
//!     "definitions": {
//!         "User": { "type": "object", "description": "Account owner" }
//!     }
//! });
//!
//! let condensed = condense_schema(&schema).unwrap();
//! assert_eq!(
//!     condensed.to_value(),
//!     json!({
//!         "owner": { "description": "Account owner" },
//!         "tags": { "_items": { "description": "A tag" } }
//!     })
//! );
//! ```

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CondenseError, Result};
use crate::pointer::resolve_ref;
use crate::schema::{SchemaNode, ITEMS_KEY};

/// What to do when a `$ref` chain revisits a pointer it is already expanding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Fail with [`CondenseError::RefCycle`]
    #[default]
    Error,
    /// Treat the revisited `$ref` as unresolved and stop descending
    Truncate,
}

/// Options controlling a condensation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondenseOptions {
    #[serde(default)]
    pub on_cycle: CyclePolicy,
    /// Maximum nesting of properties, items and `$ref` hops below the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl CondenseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cycle(mut self, policy: CyclePolicy) -> Self {
        self.on_cycle = policy;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Condensed form of a schema node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CondensedNode {
    description: Option<String>,
    properties: Vec<(String, CondensedNode)>,
    items: Option<Box<CondensedNode>>,
    extensions: Map<String, Value>,
}

impl CondensedNode {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Condensed child for a property name
    pub fn property(&self, name: &str) -> Option<&CondensedNode> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Condensed properties in source order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &CondensedNode)> {
        self.properties.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Condensed array item schema (`_items`)
    pub fn items(&self) -> Option<&CondensedNode> {
        self.items.as_deref()
    }

    /// Extension value copied verbatim from the source
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    pub fn extensions(&self) -> &Map<String, Value> {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.properties.is_empty()
            && self.items.is_none()
            && self.extensions.is_empty()
    }

    /// Render as a JSON object.
    ///
    /// Keys are written as description, properties, `_items`, extensions. A
    /// later key with the same name replaces the earlier value in place.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();

        if let Some(description) = &self.description {
            out.insert("description".to_string(), Value::String(description.clone()));
        }
        for (key, node) in &self.properties {
            out.insert(key.clone(), node.to_value());
        }
        if let Some(items) = &self.items {
            out.insert(ITEMS_KEY.to_string(), items.to_value());
        }
        for (key, value) in &self.extensions {
            out.insert(key.clone(), value.clone());
        }

        Value::Object(out)
    }
}

impl From<CondensedNode> for Value {
    fn from(node: CondensedNode) -> Self {
        node.to_value()
    }
}

impl Serialize for CondensedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Condense a schema using itself as the `$ref` base and default options
pub fn condense_schema(schema: &Value) -> Result<CondensedNode> {
    Condenser::default().condense(schema)
}

/// Reusable condenser carrying a set of options
#[derive(Debug, Clone, Copy, Default)]
pub struct Condenser {
    options: CondenseOptions,
}

impl Condenser {
    pub fn new(options: CondenseOptions) -> Self {
        Self { options }
    }

    /// Condense a whole document; `$ref`s resolve against `schema` itself
    pub fn condense(&self, schema: &Value) -> Result<CondensedNode> {
        self.condense_with_root(schema, schema)
    }

    /// Condense one node, resolving `$ref`s against a separate root
    pub fn condense_with_root(&self, node: &Value, root: &Value) -> Result<CondensedNode> {
        let mut walk = Walk {
            root,
            options: self.options,
            chain: Vec::new(),
        };
        walk.node(node, 0)
    }
}

/// State for one condensation call
struct Walk<'a> {
    root: &'a Value,
    options: CondenseOptions,
    /// `$ref` pointers currently being expanded, outermost first
    chain: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    fn node(&mut self, value: &'a Value, depth: usize) -> Result<CondensedNode> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(CondenseError::DepthExceeded { max_depth });
            }
        }

        let node = SchemaNode::from_value(value);

        if let Some(pointer) = node.reference {
            match resolve_ref(pointer, self.root) {
                Some(_) if self.chain.contains(&pointer) => match self.options.on_cycle {
                    CyclePolicy::Error => {
                        return Err(CondenseError::RefCycle {
                            pointer: pointer.to_string(),
                            chain: self.chain.iter().map(|p| p.to_string()).collect(),
                        });
                    }
                    CyclePolicy::Truncate => {
                        debug!(pointer, depth, "truncating $ref cycle");
                    }
                },
                Some(target) => {
                    self.chain.push(pointer);
                    let resolved = self.node(target, depth + 1);
                    self.chain.pop();
                    return resolved;
                }
                None => debug!(pointer, "leaving unresolved $ref"),
            }
        }

        self.expand(&node, depth)
    }

    fn expand(&mut self, node: &SchemaNode<'a>, depth: usize) -> Result<CondensedNode> {
        let mut out = CondensedNode {
            description: node
                .description
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            ..CondensedNode::default()
        };

        if let Some(properties) = node.properties {
            out.properties.reserve(properties.len());
            for (name, child) in properties {
                let condensed = self.node(child, depth + 1)?;
                out.properties.push((name.clone(), condensed));
            }
        }

        if let Some(items) = node.items {
            out.items = Some(Box::new(self.node(items, depth + 1)?));
        }

        for (key, value) in &node.extensions {
            out.extensions.insert((*key).to_string(), (*value).clone());
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn condense(value: Value) -> Value {
        condense_schema(&value).unwrap().to_value()
    }

    #[test]
    fn test_leaf_with_description() {
        assert_eq!(
            condense(json!({ "type": "string", "description": "Name" })),
            json!({ "description": "Name" })
        );
    }

    #[test]
    fn test_leaf_without_description() {
        assert_eq!(condense(json!({ "type": "integer", "minimum": 0 })), json!({}));
    }

    #[test]
    fn test_empty_description_dropped() {
        assert_eq!(condense(json!({ "description": "" })), json!({}));
    }

    #[test]
    fn test_ref_replaces_node() {
        let schema = json!({
            "properties": {
                "foo": { "$ref": "#/definitions/Foo", "description": "ignored", "x-note": 1 }
            },
            "definitions": { "Foo": { "description": "x" } }
        });
        assert_eq!(condense(schema), json!({ "foo": { "description": "x" } }));
    }

    #[test]
    fn test_root_ref() {
        let schema = json!({
            "$ref": "#/definitions/Foo",
            "definitions": { "Foo": { "description": "x" } }
        });
        assert_eq!(condense(schema), json!({ "description": "x" }));
    }

    #[test]
    fn test_property_nesting() {
        let schema = json!({
            "properties": {
                "a": { "description": "A" },
                "b": { "type": "string" }
            }
        });
        assert_eq!(condense(schema), json!({ "a": { "description": "A" }, "b": {} }));
    }

    #[test]
    fn test_array_items() {
        assert_eq!(
            condense(json!({ "items": { "description": "item desc" } })),
            json!({ "_items": { "description": "item desc" } })
        );
    }

    #[test]
    fn test_properties_and_items_coexist() {
        let schema = json!({
            "properties": { "a": { "description": "A" } },
            "items": { "description": "I" }
        });
        assert_eq!(
            condense(schema),
            json!({ "a": { "description": "A" }, "_items": { "description": "I" } })
        );
    }

    #[test]
    fn test_unresolvable_ref_falls_through() {
        assert_eq!(condense(json!({ "$ref": "#/nope" })), json!({}));
        assert_eq!(
            condense(json!({ "$ref": "#/nope", "description": "kept" })),
            json!({ "description": "kept" })
        );
    }

    #[test]
    fn test_null_target_counts_as_resolved() {
        let schema = json!({
            "properties": {
                "gap": { "$ref": "#/definitions/Nothing", "description": "dropped" }
            },
            "definitions": { "Nothing": null }
        });
        assert_eq!(condense(schema), json!({ "gap": {} }));
    }

    #[test]
    fn test_non_local_ref_never_resolved() {
        assert_eq!(condense(json!({ "$ref": "http://example.com/schema" })), json!({}));
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(
            condense(json!({ "x-custom": 42, "description": "d" })),
            json!({ "description": "d", "x-custom": 42 })
        );
    }

    #[test]
    fn test_passthrough_is_not_condensed() {
        let schema = json!({ "example": { "type": "string", "$ref": "#/nope" } });
        assert_eq!(condense(schema.clone()), schema);
    }

    #[test]
    fn test_non_object_nodes() {
        assert_eq!(condense(json!(true)), json!({}));
        assert_eq!(condense(json!({ "properties": { "any": true } })), json!({ "any": {} }));
    }

    #[test]
    fn test_idempotent_on_condensed_output() {
        let schema = json!({
            "description": "Root",
            "properties": {
                "user": {
                    "description": "User",
                    "properties": { "name": { "description": "Name" } }
                },
                "tags": { "items": { "description": "Tag" } }
            }
        });
        let once = condense(schema);
        let twice = condense(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_key_order_follows_steps() {
        let schema = json!({
            "x-first": 1,
            "items": { "description": "I" },
            "properties": { "z": {}, "a": {} },
            "description": "D"
        });
        let value = condense(schema);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["description", "z", "a", "_items", "x-first"]);
    }

    #[test]
    fn test_later_step_overwrites_in_place() {
        let schema = json!({
            "description": "D",
            "properties": { "description": { "description": "nested" } }
        });
        assert_eq!(
            condense(schema),
            json!({ "description": { "description": "nested" } })
        );
    }

    #[test]
    fn test_sibling_refs_are_not_cycles() {
        let schema = json!({
            "properties": {
                "home": { "$ref": "#/definitions/Address" },
                "work": { "$ref": "#/definitions/Address" }
            },
            "definitions": {
                "Address": {
                    "description": "Postal address",
                    "properties": { "city": { "description": "City" } }
                }
            }
        });
        let condensed = condense_schema(&schema).unwrap();
        assert_eq!(condensed.property("home"), condensed.property("work"));
        assert_eq!(
            condensed.property("home").and_then(|h| h.property("city")).and_then(|c| c.description()),
            Some("City")
        );
    }

    fn mutual_cycle() -> Value {
        json!({
            "properties": { "start": { "$ref": "#/definitions/A" } },
            "definitions": {
                "A": { "$ref": "#/definitions/B" },
                "B": { "$ref": "#/definitions/A", "description": "B" }
            }
        })
    }

    #[test]
    fn test_cycle_errors_by_default() {
        let err = condense_schema(&mutual_cycle()).unwrap_err();
        match err {
            CondenseError::RefCycle { pointer, chain } => {
                assert_eq!(pointer, "#/definitions/A");
                assert_eq!(chain, vec!["#/definitions/A", "#/definitions/B"]);
            }
            other => panic!("Expected RefCycle, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_truncates() {
        let condenser = Condenser::new(CondenseOptions::new().on_cycle(CyclePolicy::Truncate));
        let condensed = condenser.condense(&mutual_cycle()).unwrap();
        // start -> A -> B, where B's $ref back to A is left unresolved
        assert_eq!(condensed.to_value(), json!({ "start": { "description": "B" } }));
    }

    #[test]
    fn test_recursive_tree_truncates() {
        let schema = json!({
            "$ref": "#/definitions/Node",
            "definitions": {
                "Node": {
                    "description": "Tree node",
                    "properties": {
                        "children": { "items": { "$ref": "#/definitions/Node" } }
                    }
                }
            }
        });
        let condenser = Condenser::new(CondenseOptions::new().on_cycle(CyclePolicy::Truncate));
        assert_eq!(
            condenser.condense(&schema).unwrap().to_value(),
            json!({
                "description": "Tree node",
                "children": { "_items": {} }
            })
        );
    }

    #[test]
    fn test_max_depth() {
        let schema = json!({
            "properties": { "a": { "properties": { "b": { "description": "deep" } } } }
        });
        let shallow = Condenser::new(CondenseOptions::new().max_depth(1));
        assert!(matches!(
            shallow.condense(&schema),
            Err(CondenseError::DepthExceeded { max_depth: 1 })
        ));

        let enough = Condenser::new(CondenseOptions::new().max_depth(2));
        assert!(enough.condense(&schema).is_ok());
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let condensed = condense_schema(&json!({ "description": "d", "x-a": [1, 2] })).unwrap();
        let text = serde_json::to_string(&condensed).unwrap();
        assert_eq!(text, r#"{"description":"d","x-a":[1,2]}"#);
    }

    #[test]
    fn test_options_deserialize() {
        let options: CondenseOptions =
            serde_json::from_value(json!({ "on_cycle": "truncate", "max_depth": 8 })).unwrap();
        assert_eq!(options, CondenseOptions::new().on_cycle(CyclePolicy::Truncate).max_depth(8));
    }
}
