//! Item Model
//!
//! Records mirrored from a remote collection, plus the payload used to create
//! new ones.

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ListError, ListResult};

/// Hosts that are recorded by the server when it builds asset URLs for itself
const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];

/// A single record of a server-hosted collection (photo, offer, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireItem")]
pub struct Item {
    /// Opaque identifier assigned by the server
    #[serde(rename = "_id")]
    pub id: String,
    /// Locator of the attached image, as recorded at upload time
    #[serde(rename = "imageUrl", alias = "mediaUrl", default)]
    pub media_url: String,
    /// Remaining descriptive fields (name, description, location, offerType...)
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Record as the server sends it. `_id` wins over a plain `id`; when both
/// are present the plain one stays an ordinary attribute.
#[derive(Deserialize)]
struct WireItem {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    #[serde(rename = "imageUrl", alias = "mediaUrl", default)]
    media_url: String,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl TryFrom<WireItem> for Item {
    type Error = String;

    fn try_from(wire: WireItem) -> Result<Self, Self::Error> {
        let mut attributes = wire.rest;
        let id = match wire.mongo_id {
            Some(id) => id,
            None => match attributes.remove("id") {
                Some(Value::String(id)) => id,
                Some(Value::Number(id)) => id.to_string(),
                _ => return Err("record has no `_id` or `id`".to_string()),
            },
        };
        Ok(Self {
            id,
            media_url: wire.media_url,
            attributes,
        })
    }
}

impl Item {
    pub fn new(id: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_url: media_url.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), Value::String(value.into()));
        self
    }

    /// String attribute by name; non-string values yield `None`
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Every scalar attribute rendered as text
    pub fn text_attributes(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect()
    }

    /// Media URL with a loopback host swapped for the real server host.
    ///
    /// The server records its own asset URLs against `localhost`, which is
    /// unreachable from a phone. URLs that do not parse are returned as-is.
    pub fn media_url_for(&self, server_host: &str) -> String {
        match Url::parse(&self.media_url) {
            Ok(mut url) if url.host_str().is_some_and(|h| LOOPBACK_HOSTS.contains(&h)) => {
                match url.set_host(Some(server_host)) {
                    Ok(()) => url.to_string(),
                    Err(_) => self.media_url.clone(),
                }
            }
            _ => self.media_url.clone(),
        }
    }
}

/// Binary attachment sent with a create request
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAsset {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MediaAsset {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Multipart payload for creating an item: text fields plus one image
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub fields: Vec<(String, String)>,
    pub asset: MediaAsset,
}

impl NewItem {
    pub fn new(asset: MediaAsset) -> Self {
        Self {
            fields: Vec::new(),
            asset,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check that every named field is present and non-blank and that an
    /// image is attached
    pub fn require(&self, names: &[&str]) -> ListResult<()> {
        if self.asset.bytes.is_empty() {
            return Err(ListError::Validation("Please select an image".to_string()));
        }
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| self.field(name).map_or(true, |v| v.trim().is_empty()))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ListError::Validation(format!(
                "Please fill all fields (missing: {})",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_shape() {
        let json = r#"{
            "_id": "65f1",
            "imageUrl": "http://localhost:2510/uploads/a.jpg",
            "name": "Lake",
            "location": "Hunza",
            "__v": 0
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "65f1");
        assert_eq!(item.attribute("name"), Some("Lake"));
        assert_eq!(item.attribute("__v"), None);
        assert_eq!(item.text_attributes().get("__v").map(String::as_str), Some("0"));
    }

    #[test]
    fn accepts_plain_id_alias() {
        let item: Item = serde_json::from_str(r#"{"id":"7","mediaUrl":"x"}"#).unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.media_url, "x");
    }

    #[test]
    fn underscore_id_wins_when_both_ids_are_sent() {
        let json = r#"[{"_id":"65f1","id":"65f1-virtual","imageUrl":"x","name":"Lake"}]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].id, "65f1");
        assert_eq!(items[0].attribute("id"), Some("65f1-virtual"));
        assert_eq!(items[0].attribute("name"), Some("Lake"));
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_str::<Item>(r#"{"imageUrl":"x"}"#).is_err());
    }

    #[test]
    fn loopback_host_is_substituted() {
        let item = Item::new("1", "http://localhost:2510/uploads/a.jpg");
        assert_eq!(
            item.media_url_for("192.168.18.43"),
            "http://192.168.18.43:2510/uploads/a.jpg"
        );
    }

    #[test]
    fn foreign_and_relative_urls_are_kept() {
        let remote = Item::new("1", "https://cdn.example.com/a.jpg");
        assert_eq!(remote.media_url_for("10.0.0.2"), "https://cdn.example.com/a.jpg");

        let relative = Item::new("2", "/uploads/a.jpg");
        assert_eq!(relative.media_url_for("10.0.0.2"), "/uploads/a.jpg");
    }

    #[test]
    fn require_reports_missing_fields() {
        let item = NewItem::new(MediaAsset::new("a.jpg", "image/jpeg", vec![1, 2, 3]))
            .with_field("name", "Lake")
            .with_field("description", "  ");
        let err = item.require(&["name", "description", "location"]).unwrap_err();
        assert_eq!(
            err,
            ListError::Validation("Please fill all fields (missing: description, location)".into())
        );
    }

    #[test]
    fn require_needs_an_image() {
        let item = NewItem::new(MediaAsset::new("a.jpg", "image/jpeg", Vec::new()))
            .with_field("name", "Lake");
        assert!(matches!(item.require(&["name"]), Err(ListError::Validation(_))));
    }
}
