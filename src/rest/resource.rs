//! Schema-less resource records with dirty tracking.
//!
//! This module provides [`Resource`], the record type behind every Airwallex
//! entity. Fields are kept as JSON values so that the SDK does not break when
//! the API adds or reshapes fields. Writes are tracked so that [`save`] sends
//! only what the caller changed; sending untouched fields back could clobber
//! a concurrent server-side modification.
//!
//! # Example
//!
//! ```rust
//! use airwallex_api::Resource;
//! use serde_json::json;
//!
//! let mut transfer = Resource::from_value(json!({"id": "tr_1", "amount": 1}));
//! assert!(!transfer.is_dirty());
//!
//! transfer.set("amount", 2);
//! transfer.set("amount", 3);
//!
//! assert_eq!(transfer.changed_fields(), vec!["amount"]);
//! assert_eq!(transfer.previous_value("amount"), Some(&json!(1)));
//! assert_eq!(transfer.get("amount").unwrap(), &json!(3));
//! assert!(transfer.get("amuont").is_err());
//! ```
//!
//! [`save`]: crate::rest::Update::save

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::Client;
use crate::error::Error;

/// A server-side entity with dynamic fields and change tracking.
///
/// # Invariants
///
/// - `id` mirrors the `id` field whenever that field is a string or number.
/// - The dirty set records, for each field written since the last load, the
///   value it had at that load (`null` if it did not exist). Later writes to
///   the same field never overwrite the recorded original.
/// - [`Resource::load_from`] replaces the fields and clears the dirty set in
///   one step; the two are never observed out of sync.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    id: Option<String>,
    fields: Map<String, Value>,
    previous: HashMap<String, Value>,
}

impl Resource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resource from a decoded response or caller-supplied fields.
    ///
    /// Anything other than a JSON object yields an empty resource.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let mut resource = Self::new();
        resource.load_from(value);
        resource
    }

    /// Creates a resource from a field map.
    #[must_use]
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self::from_value(Value::Object(fields))
    }

    /// Returns the identity of this resource, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Reads a field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] if the resource has no such field.
    /// A field that is present with a `null` value is returned as `null`.
    pub fn get(&self, name: &str) -> Result<&Value, Error> {
        self.fields.get(name).ok_or_else(|| Error::UnknownAttribute {
            name: name.to_string(),
        })
    }

    /// Reads a field and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for a missing field and
    /// [`Error::Decode`] if the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error> {
        let value = self.get(name)?.clone();
        Ok(serde_json::from_value(value)?)
    }

    /// Returns a string field, or `None` if it is absent or not a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Returns a numeric field as `f64`, accepting numeric strings.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns `true` if the resource has the field.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Writes a field, recording its value at last load on the first write.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();

        if !self.previous.contains_key(&name) {
            let original = self.fields.get(&name).cloned().unwrap_or(Value::Null);
            self.previous.insert(name.clone(), original);
        }
        if name == "id" {
            self.id = promote_id(&value);
        }
        self.fields.insert(name, value);
    }

    /// Returns `true` if any field was written since the last load.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.previous.is_empty()
    }

    /// Returns the names of fields written since the last load, sorted.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.previous.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the value a changed field had at the last load.
    #[must_use]
    pub fn previous_value(&self, name: &str) -> Option<&Value> {
        self.previous.get(name)
    }

    /// Returns the current values of the changed fields only.
    #[must_use]
    pub fn changes(&self) -> Map<String, Value> {
        self.previous
            .keys()
            .filter_map(|name| {
                self.fields
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }

    /// Replaces every field with `data` and clears the dirty set.
    ///
    /// Used after every call that returns the server's view of the entity.
    pub fn load_from(&mut self, data: Value) {
        let fields = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = fields.get("id").and_then(promote_id);

        *self = Self {
            id,
            fields,
            previous: HashMap::new(),
        };
    }

    /// Re-reads the entity from `GET <resource_path>/<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for `id` if the resource has no
    /// identity, or any error from the request.
    pub async fn refresh_from_server(
        &mut self,
        client: &Client,
        resource_path: &str,
    ) -> Result<(), Error> {
        let path = self.member_path(resource_path)?;
        let data = client.get(&path, None, None).await?;
        self.load_from(data);
        Ok(())
    }

    /// Returns the field map.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a copy of all fields.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        self.fields.clone()
    }

    /// Returns all fields as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Returns `<resource_path>/<id>` with the id percent-encoded.
    pub(crate) fn member_path(&self, resource_path: &str) -> Result<String, Error> {
        let id = self.id().ok_or_else(|| Error::UnknownAttribute {
            name: "id".to_string(),
        })?;
        Ok(member_path(resource_path, id))
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Builds `<resource_path>/<id>` with the id percent-encoded as one segment.
pub(crate) fn member_path(resource_path: &str, id: &str) -> String {
    format!("{resource_path}/{}", urlencoding::encode(id))
}

fn promote_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
