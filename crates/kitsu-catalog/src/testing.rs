//! In-memory catalog source for view tests.

use crate::api::{CatalogError, CatalogSource, ListDocument, Query, Result, SingleDocument};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Mutex;

struct Route {
    endpoint: String,
    required: Vec<(String, String)>,
    response: std::result::Result<Value, (u16, String)>,
}

/// Serves canned JSON documents and records every request
#[derive(Default)]
pub struct StubSource {
    routes: Vec<Route>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` with `body` when the query carries all `required` pairs
    pub fn on(mut self, endpoint: &str, required: &[(&str, &str)], body: Value) -> Self {
        self.routes.push(Route {
            endpoint: endpoint.to_string(),
            required: owned(required),
            response: Ok(body),
        });
        self
    }

    /// Answer with a non-success status instead
    pub fn fail(
        mut self,
        endpoint: &str,
        required: &[(&str, &str)],
        status: u16,
        detail: &str,
    ) -> Self {
        self.routes.push(Route {
            endpoint: endpoint.to_string(),
            required: owned(required),
            response: Err((status, detail.to_string())),
        });
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, endpoint: &str, query: &Query) -> Result<Value> {
        let pairs = query.pairs();
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), pairs.clone()));

        let route = self
            .routes
            .iter()
            .find(|r| r.endpoint == endpoint && r.required.iter().all(|p| pairs.contains(p)))
            .ok_or_else(|| CatalogError::Http {
                status: StatusCode::NOT_FOUND,
                message: format!("no stub for {}", endpoint),
            })?;

        match &route.response {
            Ok(body) => Ok(body.clone()),
            Err((status, detail)) => Err(CatalogError::Http {
                status: StatusCode::from_u16(*status).unwrap(),
                message: detail.clone(),
            }),
        }
    }
}

impl CatalogSource for StubSource {
    async fn fetch_list<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<ListDocument<A>> {
        Ok(serde_json::from_value(self.respond(endpoint, query)?)?)
    }

    async fn fetch_one<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<SingleDocument<A>> {
        Ok(serde_json::from_value(self.respond(endpoint, query)?)?)
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn anime_resource(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "type": "anime",
        "attributes": { "canonicalTitle": title, "averageRating": "80.00" }
    })
}

/// List document of shows named after their ids
pub fn anime_list(ids: &[&str], count: Option<u64>) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| anime_resource(id, &format!("Show {}", id)))
        .collect();
    match count {
        Some(count) => json!({ "data": data, "meta": { "count": count } }),
        None => json!({ "data": data }),
    }
}

pub fn episode_list(numbers: &[u32]) -> Value {
    let data: Vec<Value> = numbers
        .iter()
        .map(|n| {
            json!({
                "id": format!("ep-{}", n),
                "type": "episodes",
                "attributes": { "number": n, "canonicalTitle": format!("Chapter {}", n) }
            })
        })
        .collect();
    json!({ "data": data })
}

pub fn category_list(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "type": "categories",
                "attributes": { "title": format!("Category {}", id), "slug": format!("category-{}", id) }
            })
        })
        .collect();
    json!({ "data": data })
}
