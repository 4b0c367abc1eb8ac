//! HTTP Collection Client
//!
//! reqwest-backed implementation of [`RemoteCollection`].

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RemoteCollection;
use crate::error::{ListError, ListResult};
use crate::item::{Item, NewItem};

/// Paths of one collection, relative to the server base URL.
///
/// `delete` must contain an `{id}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEndpoints {
    pub list: String,
    pub create: String,
    pub delete: String,
    /// Whether `list` honours `page` / `limit`; otherwise it is fetched once
    #[serde(default = "paged_by_default")]
    pub paged: bool,
}

fn paged_by_default() -> bool {
    true
}

impl CollectionEndpoints {
    /// Conventional layout: `GET /c?page&limit`, `POST /c`, `DELETE /c/{id}`
    pub fn rest(collection: &str) -> Self {
        let collection = collection.trim_matches('/');
        Self {
            list: collection.to_string(),
            create: collection.to_string(),
            delete: format!("{}/{{id}}", collection),
            paged: true,
        }
    }

    /// Same routes, but the list endpoint always returns everything
    pub fn unpaged(mut self) -> Self {
        self.paged = false;
        self
    }
}

/// Ids travel as one path segment and may not navigate the path
fn check_id(id: &str) -> ListResult<()> {
    let navigates = matches!(id, "" | "." | "..") || id.contains(['/', '\\', '?', '#']);
    if navigates || id.trim().is_empty() {
        return Err(ListError::Validation(format!("Invalid item id '{}'", id)));
    }
    Ok(())
}

/// Client for one remote collection
#[derive(Debug, Clone)]
pub struct HttpCollection {
    client: reqwest::Client,
    base: Url,
    endpoints: CollectionEndpoints,
}

impl HttpCollection {
    pub fn new(client: reqwest::Client, base_url: &str, endpoints: CollectionEndpoints) -> ListResult<Self> {
        // A trailing slash keeps any path prefix of the base when joining
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalized)
            .map_err(|e| ListError::Validation(format!("Invalid server address {}: {}", base_url, e)))?;
        Ok(Self { client, base, endpoints })
    }

    pub fn endpoints(&self) -> &CollectionEndpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> ListResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ListError::Validation(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Delete route with `id` pushed as a single percent-encoded segment
    fn delete_url(&self, id: &str) -> ListResult<Url> {
        check_id(id)?;
        let template = &self.endpoints.delete;
        let (prefix, suffix) = template
            .split_once("{id}")
            .ok_or_else(|| ListError::Validation(format!("Delete route {} has no {{id}}", template)))?;

        let mut url = self.url(prefix)?;
        url.path_segments_mut()
            .map_err(|_| ListError::Validation(format!("Invalid endpoint {}", template)))?
            .pop_if_empty()
            .push(id)
            .extend(suffix.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl RemoteCollection for HttpCollection {
    async fn list_page(&self, page: u32, page_size: u32) -> ListResult<Vec<Item>> {
        let url = self.url(&self.endpoints.list)?;
        let mut request = self.client.get(url.clone());
        if self.endpoints.paged {
            debug!("GET {} page={} limit={}", url, page, page_size);
            request = request.query(&[("page", page), ("limit", page_size)]);
        } else {
            debug!("GET {} (whole collection)", url);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(if status.is_server_error() {
                ListError::Network(format!("server error {}", status))
            } else {
                ListError::Protocol(format!("unexpected status {}", status))
            });
        }

        let body = response.bytes().await?;
        decode_items(&body)
    }

    async fn create(&self, item: NewItem) -> ListResult<Item> {
        let url = self.url(&self.endpoints.create)?;
        debug!("POST {} ({} fields, {} bytes)", url, item.fields.len(), item.asset.bytes.len());

        let mut form = Form::new();
        for (name, value) in item.fields {
            form = form.text(name, value);
        }
        let image = Part::bytes(item.asset.bytes)
            .file_name(item.asset.file_name)
            .mime_str(&item.asset.mime_type)
            .map_err(|e| ListError::Validation(format!("Unsupported image type: {}", e)))?;
        form = form.part("image", image);

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            serde_json::from_slice::<Item>(&body)
                .map_err(|e| ListError::Protocol(format!("created record: {}", e)))
        } else if status.is_client_error() {
            Err(ListError::Validation(
                server_message(&body).unwrap_or_else(|| rejected_message(status)),
            ))
        } else {
            Err(ListError::Network(format!("server error {}", status)))
        }
    }

    async fn delete(&self, id: &str) -> ListResult<bool> {
        let url = self.delete_url(id)?;
        debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("delete of {} answered {}", id, status);
        }
        Ok(status.is_success())
    }

    fn is_paged(&self) -> bool {
        self.endpoints.paged
    }
}

/// Decode a list body, insisting on a JSON array of items
fn decode_items(body: &[u8]) -> ListResult<Vec<Item>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ListError::Protocol(format!("body is not JSON: {}", e)))?;
    if !value.is_array() {
        return Err(ListError::Protocol(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| ListError::Protocol(format!("malformed item: {}", e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `message` field of an error body, if the server sent one
fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn rejected_message(status: StatusCode) -> String {
    format!("Upload rejected by server ({})", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MediaAsset;
    use mockito::{Matcher, Server};

    fn collection(server: &Server, endpoints: CollectionEndpoints) -> HttpCollection {
        HttpCollection::new(reqwest::Client::new(), &server.url(), endpoints).unwrap()
    }

    #[test]
    fn rest_endpoints_follow_collection_name() {
        let endpoints = CollectionEndpoints::rest("/images/uploads/");
        assert_eq!(endpoints.list, "images/uploads");
        assert!(endpoints.paged);

        let client = HttpCollection::new(reqwest::Client::new(), "http://h:1", endpoints).unwrap();
        assert_eq!(client.delete_url("abc").unwrap().as_str(), "http://h:1/images/uploads/abc");
        assert_eq!(client.delete_url("a b").unwrap().as_str(), "http://h:1/images/uploads/a%20b");
    }

    #[test]
    fn delete_url_keeps_segments_after_the_id() {
        let endpoints = CollectionEndpoints {
            delete: "offers/{id}/remove".into(),
            ..CollectionEndpoints::rest("offers")
        };
        let client = HttpCollection::new(reqwest::Client::new(), "http://h:1/api", endpoints).unwrap();
        assert_eq!(client.delete_url("o1").unwrap().as_str(), "http://h:1/api/offers/o1/remove");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let client = HttpCollection::new(
            reqwest::Client::new(),
            "http://10.0.0.2:2510/api",
            CollectionEndpoints::rest("images"),
        )
        .unwrap();
        assert_eq!(client.url("images").unwrap().as_str(), "http://10.0.0.2:2510/api/images");
    }

    #[test]
    fn invalid_base_is_a_validation_error() {
        let result = HttpCollection::new(reqwest::Client::new(), "not a url", CollectionEndpoints::rest("x"));
        assert!(matches!(result, Err(ListError::Validation(_))));
    }

    #[tokio::test]
    async fn list_page_sends_page_and_limit() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/images/uploads")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"_id":"a","imageUrl":"u1","name":"A"},{"_id":"b","imageUrl":"u2"}]"#)
            .create_async()
            .await;

        let client = collection(&server, CollectionEndpoints::rest("images/uploads"));
        let items = client.list_page(2, 10).await.expect("page should load");

        mock.assert_async().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].attribute("name"), Some("A"));
    }

    #[tokio::test]
    async fn non_array_body_is_a_protocol_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/images")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"images":[]}"#)
            .create_async()
            .await;

        let client = collection(&server, CollectionEndpoints::rest("images"));
        let err = client.list_page(1, 10).await.unwrap_err();
        assert_eq!(err, ListError::Protocol("expected a JSON array, got an object".into()));
    }

    #[tokio::test]
    async fn server_error_on_list_is_a_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/images")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = collection(&server, CollectionEndpoints::rest("images"));
        assert!(matches!(client.list_page(1, 10).await, Err(ListError::Network(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client = HttpCollection::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            CollectionEndpoints::rest("images"),
        )
        .unwrap();
        assert!(matches!(client.list_page(1, 10).await, Err(ListError::Network(_))));
    }

    #[tokio::test]
    async fn create_posts_multipart_with_image_part() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/images/uploads")
            .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="location""#.into()),
                Matcher::Regex(r#"name="image"; filename="lake.jpg""#.into()),
            ]))
            .with_status(201)
            .with_body(r#"{"_id":"new","imageUrl":"http://localhost:2510/uploads/lake.jpg","name":"Lake"}"#)
            .create_async()
            .await;

        let client = collection(&server, CollectionEndpoints::rest("images/uploads"));
        let payload = NewItem::new(MediaAsset::new("lake.jpg", "image/jpeg", b"JPEG".to_vec()))
            .with_field("name", "Lake")
            .with_field("location", "Hunza");
        let created = client.create(payload).await.expect("upload should succeed");

        mock.assert_async().await;
        assert_eq!(created.id, "new");
    }

    #[tokio::test]
    async fn create_rejection_surfaces_server_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/images")
            .with_status(400)
            .with_body(r#"{"message":"Description is required"}"#)
            .create_async()
            .await;

        let client = collection(&server, CollectionEndpoints::rest("images"));
        let payload = NewItem::new(MediaAsset::new("a.png", "image/png", vec![1]));
        let err = client.create(payload).await.unwrap_err();
        assert_eq!(err, ListError::Validation("Description is required".into()));
    }

    #[tokio::test]
    async fn delete_uses_custom_route_and_reports_refusal() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("DELETE", "/offerImages/delete/o1")
            .with_status(200)
            .with_body(r#"{"message":"deleted"}"#)
            .create_async()
            .await;
        let refused = server
            .mock("DELETE", "/offerImages/delete/o2")
            .with_status(404)
            .with_body(r#"{"message":"not found"}"#)
            .create_async()
            .await;

        let endpoints = CollectionEndpoints {
            list: "offerImages/offerImages".into(),
            create: "offerImages/uploads".into(),
            delete: "offerImages/delete/{id}".into(),
            paged: false,
        };
        let client = collection(&server, endpoints);

        assert_eq!(client.delete("o1").await, Ok(true));
        assert_eq!(client.delete("o2").await, Ok(false));
        ok.assert_async().await;
        refused.assert_async().await;
    }

    #[tokio::test]
    async fn delete_rejects_path_like_ids() {
        let server = Server::new_async().await;
        let client = collection(&server, CollectionEndpoints::rest("images/uploads"));
        for id in ["../x", "..", ".", "", " ", "a?b", "a#b", r"..\x"] {
            assert!(
                matches!(client.delete(id).await, Err(ListError::Validation(_))),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[tokio::test]
    async fn unpaged_list_sends_no_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/offerImages/offerImages")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(r#"[{"_id":"o1","imageUrl":"u","offerType":"Bus Offers"}]"#)
            .create_async()
            .await;

        let endpoints = CollectionEndpoints::rest("offerImages/offerImages").unpaged();
        let client = collection(&server, endpoints);
        let items = client.list_page(3, 10).await.expect("list should load");

        mock.assert_async().await;
        assert_eq!(items.len(), 1);
        assert!(!client.is_paged());
    }
}
