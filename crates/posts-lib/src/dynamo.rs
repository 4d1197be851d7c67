//! DynamoDB implementation of [`PostStore`].
//!
//! Items are flat maps: `id`, `title` and `body` as `S`, `userId` as `N`.
//! Reads tolerate missing non-key attributes so items written by other tools
//! still load; a missing `id` or a wrongly typed attribute is reported as
//! [`StoreError::MalformedItem`].

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::post::Post;
use crate::settings::StoreSettings;
use crate::store::{PostStore, StoreError};

const ID_ATTR: &str = "id";
const TITLE_ATTR: &str = "title";
const BODY_ATTR: &str = "body";
const USER_ID_ATTR: &str = "userId";

/// A DynamoDB item as returned by the SDK.
pub type Item = HashMap<String, AttributeValue>;

/// Posts table backed by DynamoDB.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Wrap an already configured client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_settings(settings: &StoreSettings) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), settings.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl PostStore for DynamoStore {
    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        debug!(table = %self.table_name, id = %id, "GetItem");
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTR, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Backend(DisplayErrorContext(&err).to_string()))?;

        output.item().map(post_from_item).transpose()
    }

    async fn put(&self, post: &Post) -> Result<(), StoreError> {
        debug!(table = %self.table_name, id = %post.id, "PutItem");
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(post_to_item(post)))
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StoreError::Backend(DisplayErrorContext(&err).to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        debug!(table = %self.table_name, id = %id, "DeleteItem");
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTR, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StoreError::Backend(DisplayErrorContext(&err).to_string()))
    }
}

/// Encode a post as a DynamoDB item.
pub fn post_to_item(post: &Post) -> Item {
    HashMap::from([
        (ID_ATTR.to_string(), AttributeValue::S(post.id.clone())),
        (TITLE_ATTR.to_string(), AttributeValue::S(post.title.clone())),
        (BODY_ATTR.to_string(), AttributeValue::S(post.body.clone())),
        (
            USER_ID_ATTR.to_string(),
            AttributeValue::N(post.user_id.to_string()),
        ),
    ])
}

/// Decode a DynamoDB item into a post.
pub fn post_from_item(item: &Item) -> Result<Post, StoreError> {
    let id = string_attr(item, ID_ATTR)?
        .ok_or_else(|| StoreError::MalformedItem(format!("missing attribute '{ID_ATTR}'")))?;

    Ok(Post {
        id,
        title: string_attr(item, TITLE_ATTR)?.unwrap_or_default(),
        body: string_attr(item, BODY_ATTR)?.unwrap_or_default(),
        user_id: number_attr(item, USER_ID_ATTR)?.unwrap_or_default(),
    })
}

fn string_attr(item: &Item, name: &str) -> Result<Option<String>, StoreError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(value)) => Ok(Some(value.clone())),
        Some(other) => Err(StoreError::MalformedItem(format!(
            "attribute '{name}' should be a string, found {other:?}"
        ))),
    }
}

fn number_attr(item: &Item, name: &str) -> Result<Option<i64>, StoreError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::N(raw)) => raw.parse().map(Some).map_err(|_| {
            StoreError::MalformedItem(format!("attribute '{name}' is not an integer: {raw}"))
        }),
        Some(other) => Err(StoreError::MalformedItem(format!(
            "attribute '{name}' should be a number, found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            id: "5f0c".to_string(),
            title: "A".to_string(),
            body: "B".to_string(),
            user_id: 3,
        }
    }

    #[test]
    fn item_uses_table_attribute_names() {
        let item = post_to_item(&sample());
        assert_eq!(item.get("id"), Some(&AttributeValue::S("5f0c".to_string())));
        assert_eq!(item.get("userId"), Some(&AttributeValue::N("3".to_string())));
        assert_eq!(item.len(), 4);
    }

    #[test]
    fn item_decodes_back_to_post() {
        let item = post_to_item(&sample());
        assert_eq!(post_from_item(&item).unwrap(), sample());
    }

    #[test]
    fn missing_optional_attributes_default() {
        let item = HashMap::from([("id".to_string(), AttributeValue::S("x".to_string()))]);
        let post = post_from_item(&item).unwrap();
        assert_eq!(post.id, "x");
        assert!(post.title.is_empty());
        assert_eq!(post.user_id, 0);
    }

    #[test]
    fn missing_id_is_malformed() {
        let item = HashMap::from([("title".to_string(), AttributeValue::S("t".to_string()))]);
        let err = post_from_item(&item).unwrap_err();
        assert_eq!(
            err,
            StoreError::MalformedItem("missing attribute 'id'".to_string())
        );
    }

    #[test]
    fn wrong_attribute_type_is_malformed() {
        let mut item = post_to_item(&sample());
        item.insert("userId".to_string(), AttributeValue::S("three".to_string()));
        assert!(matches!(
            post_from_item(&item),
            Err(StoreError::MalformedItem(_))
        ));

        item.insert("userId".to_string(), AttributeValue::N("3.5".to_string()));
        let err = post_from_item(&item).unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }
}
