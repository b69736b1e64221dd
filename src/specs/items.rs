// src/specs/items.rs
//! Reader for `GET /api/v1/users/{user}/items?per_page=N`.
//!
//! The body is a JSON array of item objects. Only `tags` and `stock_count`
//! are read; everything else is ignored. Tags arrive either as plain strings
//! or, as the v1 API actually sends them, as objects whose `url_name` is the
//! tag (`{"name": "Swift", "url_name": "swift", ...}`).

use serde::{Deserialize, Deserializer};

use crate::config::options::NetOptions;
use crate::core::net::Fetch;
use crate::error::{Result, ScrapeError};
use crate::model::Post;

#[derive(Debug, Deserialize)]
struct ItemRecord {
    #[serde(deserialize_with = "tag_names")]
    tags: Vec<String>,
    stock_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagRecord {
    Name(String),
    Object { url_name: String },
}

fn tag_names<'de, D>(de: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<TagRecord>::deserialize(de)?;
    Ok(raw
        .into_iter()
        .map(|t| match t {
            TagRecord::Name(name) => name,
            TagRecord::Object { url_name } => url_name,
        })
        .collect())
}

impl From<ItemRecord> for Post {
    fn from(r: ItemRecord) -> Self {
        Post { tags: r.tags, stock_count: r.stock_count }
    }
}

/// All of `user`'s posts on the first page of the endpoint.
pub fn fetch(client: &dyn Fetch, net: &NetOptions, user: &str) -> Result<Vec<Post>> {
    let body = client.get_text(&net.items_url(user))?;
    parse_items(user, &body)
}

pub fn parse_items(user: &str, body: &str) -> Result<Vec<Post>> {
    let records: Vec<ItemRecord> = serde_json::from_str(body)
        .map_err(|source| ScrapeError::Decode { user: user.to_string(), source })?;
    Ok(records.into_iter().map(Post::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_tags() {
        let posts = parse_items("alice", r#"[{"tags":["bar","x"],"stock_count":3},{"tags":["y"],"stock_count":5}]"#).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].tags, vec!["bar", "x"]);
        assert_eq!(posts[0].stock_count, 3);
        assert_eq!(posts[1].stock_count, 5);
    }

    #[test]
    fn decodes_v1_tag_objects_by_url_name() {
        let body = r#"[{
            "id": 1, "title": "hello", "stock_count": 12,
            "tags": [{"name": "Swift", "url_name": "swift", "icon_url": "x", "versions": []}]
        }]"#;
        let posts = parse_items("alice", body).unwrap();
        assert_eq!(posts[0].tags, vec!["swift"]);
        assert_eq!(posts[0].stock_count, 12);
    }

    #[test]
    fn empty_array_is_no_posts() {
        assert!(parse_items("alice", "[]").unwrap().is_empty());
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let err = parse_items("bob", r#"[{"tags":["bar"]}]"#).unwrap_err();
        assert!(matches!(err, ScrapeError::Decode { ref user, .. } if user == "bob"));
    }

    #[test]
    fn non_json_and_negative_counts_are_decode_errors() {
        assert!(matches!(parse_items("bob", "<html>"), Err(ScrapeError::Decode { .. })));
        assert!(matches!(
            parse_items("bob", r#"[{"tags":[],"stock_count":-1}]"#),
            Err(ScrapeError::Decode { .. })
        ));
        assert!(matches!(
            parse_items("bob", r#"{"message":"Not found"}"#),
            Err(ScrapeError::Decode { .. })
        ));
    }
}
