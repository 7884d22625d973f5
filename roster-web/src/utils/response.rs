use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeMap, Serializer};

use roster_query::{Page, PageLinks, PageWindow};

/// One page of a collection: `{"next": .., "previous": .., "<key>": [..]}`
#[derive(Debug, Clone)]
pub struct PageResponse<T> {
    key: &'static str,
    pub links: PageLinks,
    pub items: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn new(key: &'static str, links: PageLinks, items: Vec<T>) -> Self {
        Self { key, links, items }
    }

    /// Build the response for `page`, linking neighbours of `window` under `base_path`
    pub fn from_page(key: &'static str, page: Page<T>, window: &PageWindow, base_path: &str) -> Self {
        let links = window.links(base_path, page.total);
        Self::new(key, links, page.items)
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<T: Serialize> Serialize for PageResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("next", &self.links.next)?;
        map.serialize_entry("previous", &self.links.previous)?;
        map.serialize_entry(self.key, &self.items)?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for PageResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Detail body: `{"success": true, "<key>": value, "detail"?: ..}`
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    key: &'static str,
    pub value: T,
    pub detail: Option<String>,
}

impl<T> Envelope<T> {
    pub fn new(key: &'static str, value: T) -> Self {
        Self {
            key,
            value,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = if self.detail.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("success", &true)?;
        map.serialize_entry(self.key, &self.value)?;
        if let Some(detail) = &self.detail {
            map.serialize_entry("detail", detail)?;
        }
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// 200 with a JSON body
pub fn ok<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(body))
}

/// 201 with a JSON body
pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}

/// 202 with a JSON body
pub fn accepted<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::ACCEPTED, Json(body))
}
