use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Form, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::landing;
use super::response::{found, plain_text, TEXT_PLAIN};
use super::AppState;
use crate::convert::ConversionError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/convert", get(convert_query).post(convert_form))
        .fallback(convert_path)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Field names `/convert` reads. The landing form sends `url`; scripted POSTs send `pdfUrl`.
const URL_FIELDS: [&str; 2] = ["url", "pdfUrl"];

/// First non-empty `url`, else first non-empty `pdfUrl`. Repeated keys are allowed.
fn source_url(pairs: Vec<(String, String)>) -> Option<String> {
    URL_FIELDS.iter().find_map(|field| {
        pairs
            .iter()
            .find(|(key, value)| key == field && !value.is_empty())
            .map(|(_, value)| value.clone())
    })
}

async fn landing_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    Html(landing::render(&public_base_url(&state, &headers)))
}

fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.base_url {
        return base.clone();
    }
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|proto| proto.to_str().ok())
        .and_then(|proto| proto.split(',').next())
        .map(|proto| proto.trim().to_ascii_lowercase())
        .filter(|proto| proto == "http" || proto == "https")
        .unwrap_or_else(|| "http".to_string());
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("{}://{}/", scheme, host))
        .unwrap_or_else(|| "/".to_string())
}

async fn convert_query(
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let pairs = match params {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            debug!("Unreadable /convert query: {}", e);
            Vec::new()
        }
    };
    redirect_to_canonical(pairs)
}

async fn convert_form(params: Result<Form<Vec<(String, String)>>, FormRejection>) -> Response {
    let pairs = match params {
        Ok(Form(pairs)) => pairs,
        Err(e) => {
            debug!("Unreadable /convert form body: {}", e);
            Vec::new()
        }
    };
    redirect_to_canonical(pairs)
}

fn redirect_to_canonical(pairs: Vec<(String, String)>) -> Response {
    match source_url(pairs) {
        Some(source) => found(&canonical_path(&source)),
        None => plain_text(StatusCode::BAD_REQUEST, "No URL provided"),
    }
}

/// `/` followed by the percent-encoded source URL.
pub fn canonical_path(source_url: &str) -> String {
    format!("/{}", urlencoding::encode(source_url))
}

async fn convert_path(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let raw = uri.path().strip_prefix('/').unwrap_or(uri.path());
    if raw.is_empty() || raw == "/" {
        return found("/");
    }

    let source_url = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => return ConversionError::InvalidUrl(e.to_string()).into_response(),
    };

    info!(target: "pdf_convert", url = %source_url, "Conversion requested");
    match state.service.convert(&source_url).await {
        Ok(text) => (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_PLAIN)], text).into_response(),
        Err(e) => e.into_response(),
    }
}
