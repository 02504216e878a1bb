//! GraphQL endpoint and playground page, backed by async-graphql.

use std::sync::Arc;

use async_graphql::{
    http::{playground_source, GraphQLPlaygroundConfig},
    Context, EmptyMutation, EmptySubscription, Object, Schema, SchemaBuilder, ServerError,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, warn};

use crate::{
    domain::models::Branch,
    infrastructure::state::AppState,
    services::{branches::resolve_branches, dataset::BranchDataset, errors::RequestError},
};

pub type BranchSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn branches(&self, ctx: &Context<'_>) -> Vec<Branch> {
        match ctx.data::<Arc<BranchDataset>>() {
            Ok(dataset) => resolve_branches(dataset),
            Err(err) => {
                error!(error = %err.message, "error resolving branches");
                Vec::new()
            }
        }
    }
}

pub fn schema_builder() -> SchemaBuilder<QueryRoot, EmptyMutation, EmptySubscription> {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
}

pub fn build_schema(dataset: Arc<BranchDataset>) -> BranchSchema {
    schema_builder().data(dataset).finish()
}

/// Schema definition language for the published schema.
pub fn export_sdl() -> String {
    schema_builder().finish().sdl()
}

pub fn router(endpoint: &str) -> Router {
    let page = Html(playground_source(GraphQLPlaygroundConfig::new(endpoint)));

    Router::new()
        .route(endpoint, post(handler))
        .route(
            "/",
            get(move || {
                let page = page.clone();
                async move { page }
            }),
        )
}

async fn handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request = match body
        .map_err(|rejection| RequestError::Unreadable(rejection.body_text()))
        .and_then(|bytes| parse_request(&bytes))
    {
        Ok(request) => request,
        Err(err) => return to_response(err),
    };

    let response = state.schema.execute(request).await;
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(response)).into_response()
}

fn parse_request(body: &[u8]) -> Result<async_graphql::Request, RequestError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(RequestError::MalformedJson)?;
    serde_json::from_value(value).map_err(RequestError::InvalidEnvelope)
}

fn to_response(err: RequestError) -> Response {
    let status = err.status_code();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %err, "error handling GraphQL request");
        return (status, Json(internal_error_body())).into_response();
    }

    warn!(error = %err, "rejected GraphQL request envelope");
    let response = async_graphql::Response::from_errors(vec![ServerError::new(
        err.to_string(),
        None,
    )]);
    (status, Json(response)).into_response()
}

fn internal_error_body() -> serde_json::Value {
    serde_json::json!({ "errors": [{ "message": "Internal server error" }] })
}
