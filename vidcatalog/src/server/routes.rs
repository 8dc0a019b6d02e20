use axum::{
    extract::{OriginalUri, Path, RawQuery, State},
    http::{HeaderMap, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::info;

use crate::addon::{self, CONTENT_TYPE, catalog};
use crate::channel::ChannelSource;

use super::AppState;

fn get_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:63819");
    format!("{scheme}://{host}")
}

fn json_response(value: serde_json::Value) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        value.to_string(),
    )
        .into_response()
}

/// Resource paths end in `.json`; the id is whatever precedes it.
fn strip_json(file: &str) -> &str {
    file.strip_suffix(".json").unwrap_or(file)
}

/// Collect every `genre` value from a form-encoded extra argument string.
fn parse_genres(extra: &str) -> Vec<String> {
    url::form_urlencoded::parse(extra.as_bytes())
        .filter(|(key, _)| key == "genre")
        .map(|(_, value)| value.into_owned())
        .collect()
}

/// Root endpoint: addon name, manifest location and cache status.
pub async fn index<S: ChannelSource + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Response {
    let base_url = get_base_url(&headers);
    let cache = state.cache.snapshot().map(|snapshot| {
        json!({
            "channels": snapshot.records.len(),
            "fetchedAt": snapshot.fetched_at.to_rfc3339(),
        })
    });

    json_response(json!({
        "name": state.manifest.name,
        "version": state.manifest.version,
        "manifest": format!("{}/manifest.json", base_url),
        "cache": cache,
    }))
}

/// Addon manifest endpoint.
pub async fn manifest<S: ChannelSource + 'static>(State(state): State<AppState<S>>) -> Response {
    json_response(json!(state.manifest.as_ref()))
}

/// Catalog endpoint without extra arguments (a `?genre=` query is still honoured).
pub async fn catalog<S: ChannelSource + 'static>(
    State(state): State<AppState<S>>,
    Path((kind, file)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Response {
    let genres = query.as_deref().map(parse_genres).unwrap_or_default();
    list_catalog(&state, &kind, strip_json(&file), genres).await
}

/// The last path segment exactly as sent, still percent-encoded.
fn raw_last_segment(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}

/// Catalog endpoint with extra arguments, e.g. `/catalog/tv/{id}/genre=ESPORTES.json`.
pub async fn catalog_with_extra<S: ChannelSource + 'static>(
    State(state): State<AppState<S>>,
    Path((kind, id, _)): Path<(String, String, String)>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> Response {
    // `Path` already decoded the extra segment; form decoding must see it raw
    let mut genres = parse_genres(strip_json(raw_last_segment(&uri)));
    if let Some(query) = query {
        genres.extend(parse_genres(&query));
    }
    list_catalog(&state, &kind, &id, genres).await
}

async fn list_catalog<S: ChannelSource>(
    state: &AppState<S>,
    kind: &str,
    id: &str,
    genres: Vec<String>,
) -> Response {
    info!(kind = %kind, id = %id, ?genres, "catalog request");

    if !catalog::is_supported(kind, id) {
        return json_response(json!({ "metas": [] }));
    }

    let records = state.cache.get_or_refresh().await;
    let metas = catalog::browse(&records, &genres);

    json_response(json!({ "metas": metas }))
}

/// Channel detail endpoint.
pub async fn meta<S: ChannelSource + 'static>(
    State(state): State<AppState<S>>,
    Path((kind, file)): Path<(String, String)>,
) -> Response {
    let id = strip_json(&file);
    info!(kind = %kind, id = %id, "meta request");

    if kind != CONTENT_TYPE {
        return json_response(json!({ "meta": null }));
    }

    let records = state.cache.get_or_refresh().await;
    json_response(json!({ "meta": addon::meta::detail(&records, id) }))
}

/// Channel stream endpoint.
pub async fn stream<S: ChannelSource + 'static>(
    State(state): State<AppState<S>>,
    Path((kind, file)): Path<(String, String)>,
) -> Response {
    let id = strip_json(&file);
    info!(kind = %kind, id = %id, "stream request");

    if kind != CONTENT_TYPE {
        return json_response(json!({ "streams": [] }));
    }

    let records = state.cache.get_or_refresh().await;
    json_response(json!({ "streams": addon::stream::streams(&records, id) }))
}
