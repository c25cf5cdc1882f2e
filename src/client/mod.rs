//! Catalog API client.
//!
//! Translates the two logical calls the extractor needs (`category.index`,
//! `category.get`) into JSON-RPC 2.0 requests against a single endpoint and
//! unwraps the nested result envelopes. Any failure is fatal to the run:
//! there is no retry, no caching and no request batching.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::category::{Category, CategoryDetail};
use crate::domain::types::CategoryId;


/// A well-formed HTTP response whose body does not match the JSON-RPC
/// contract.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("catalog response is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("catalog response missing `{0}`")]
    MissingField(&'static str),
}

/// Errors produced by catalog API calls.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP call could not complete: network failure, timeout or a
    /// non-2xx status.
    #[error("catalog transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The HTTP call completed but the body lacks the expected result.
    #[error("catalog protocol failure: {0}")]
    Protocol(#[from] ProtocolError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read access to the remote catalog.
///
/// The extraction driver is generic over this trait so that tests can run
/// against an in-memory catalog.
pub trait CatalogReader {
    /// Fetch the complete category listing, in server order.
    fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Fetch one category's detail, including its top products.
    fn get_category_detail(&self, id: CategoryId) -> CatalogResult<CategoryDetail>;
}

#[derive(Serialize)]
struct RpcRequest<P> {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: P,
}

#[derive(Serialize)]
struct IndexParams<'a> {
    access_key: &'a str,
}

#[derive(Serialize)]
struct DetailParams<'a> {
    access_key: &'a str,
    id: CategoryId,
}

#[derive(Deserialize)]
struct RpcEnvelope<R> {
    result: Option<R>,
}

#[derive(Deserialize)]
struct IndexResult {
    categories: Option<Vec<Category>>,
}

#[derive(Deserialize)]
struct DetailResult {
    category: Option<CategoryDetail>,
}

fn parse_index_body(body: &str) -> CatalogResult<Vec<Category>> {
    let envelope: RpcEnvelope<IndexResult> =
        serde_json::from_str(body).map_err(ProtocolError::from)?;
    let result = envelope
        .result
        .ok_or(ProtocolError::MissingField("result"))?;
    result
        .categories
        .ok_or_else(|| ProtocolError::MissingField("result.categories").into())
}

fn parse_detail_body(body: &str) -> CatalogResult<CategoryDetail> {
    let envelope: RpcEnvelope<DetailResult> =
        serde_json::from_str(body).map_err(ProtocolError::from)?;
    let result = envelope
        .result
        .ok_or(ProtocolError::MissingField("result"))?;
    result
        .category
        .ok_or_else(|| ProtocolError::MissingField("result.category").into())
}

/// Catalog client backed by a blocking HTTP transport.
pub struct HttpCatalogClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    access_key: String,
}

impl HttpCatalogClient {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
    ) -> CatalogResult<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_key: access_key.into(),
        })
    }

    /// POST one JSON-RPC request and return the raw response body.
    fn call<P: Serialize>(&self, method: &'static str, params: P) -> CatalogResult<String> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?;
        Ok(response.text()?)
    }
}

impl CatalogReader for HttpCatalogClient {
    fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let body = self.call(
            "category.index",
            IndexParams {
                access_key: &self.access_key,
            },
        )?;
        parse_index_body(&body)
    }

    fn get_category_detail(&self, id: CategoryId) -> CatalogResult<CategoryDetail> {
        let body = self.call(
            "category.get",
            DetailParams {
                access_key: &self.access_key,
                id,
            },
        )?;
        parse_detail_body(&body)
    }
}
