//! The `Post` record and its merge rules.
//!
//! Every field uses its zero value (empty string, `0`) to mean "absent". This
//! matters in two places: zero-valued fields are left out of the JSON the
//! function returns, and [`Post::merge`] treats a zero-valued update field as
//! "keep what is stored".

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A post as stored in the table and exchanged over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Partition key. Assigned by the server on create.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub title: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub body: String,

    /// Author reference. Not checked against any user store.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub user_id: i64,
}

impl Post {
    /// Replace the id, discarding whatever the client sent.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Overwrite `title`, `body` and `user_id` with the non-zero fields of
    /// `update`. The id is never touched.
    ///
    /// A zero-valued field in `update` keeps the stored value, so a client
    /// cannot clear a field through this merge.
    pub fn merge(&mut self, update: &Post) {
        if !update.title.is_empty() {
            self.title = update.title.clone();
        }
        if !update.body.is_empty() {
            self.body = update.body.clone();
        }
        if update.user_id != 0 {
            self.user_id = update.user_id;
        }
    }
}

/// Generate a fresh post id.
pub fn new_post_id() -> String {
    Uuid::new_v4().to_string()
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

// An explicit `null` decodes to the zero value, same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
