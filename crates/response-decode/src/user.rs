//! User model with a lenient best-effort constructor.
//!
//! [`User::from_object`] builds a record straight from a generic JSON
//! object without going through the decoder. Its tolerance policy differs
//! from the decoder's on purpose: construction is all-or-nothing only for
//! the identity fields, while the role list drops invalid elements and
//! keeps the rest.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

impl Role {
    /// Build a role from a generic JSON value. `None` when the value is
    /// not an object or lacks string `id`/`name`.
    pub fn from_value(value: &Value) -> Option<Role> {
        let object = value.as_object()?;
        Some(Role {
            id: object.get("id")?.as_str()?.to_string(),
            name: object.get("name")?.as_str()?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    /// Best-effort construction from a generic JSON object.
    ///
    /// `id` and `email` must be present as non-empty strings or the whole
    /// construction yields `None`. Every other field is a pass-through:
    /// absent or wrongly typed values become `None`, and role entries
    /// missing `id` or `name` are skipped rather than failing the user.
    pub fn from_object(object: &Map<String, Value>) -> Option<User> {
        let id = required_string(object, "id")?;
        let email = required_string(object, "email")?;
        let roles = match object.get("roles").and_then(Value::as_array) {
            Some(entries) => entries.iter().filter_map(Role::from_value).collect(),
            None => Vec::new(),
        };
        Some(User {
            id,
            email,
            first_name: optional_string(object, "firstName"),
            last_name: optional_string(object, "lastName"),
            phone: optional_string(object, "phone"),
            avatar_url: optional_string(object, "avatarUrl"),
            roles,
        })
    }
}

fn required_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = object.get(key)?.as_str()?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}
