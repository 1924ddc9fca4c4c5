use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::SystemConfig;
use crate::error::ApiError;
use crate::extract::LenientJson;
use crate::relay::{
    EnhanceRequest, EnhanceResponse, SynthesizeRequest, SynthesizeResponse, TranslateRequest,
    TranslateResponse,
};
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))

        // Relay endpoints
        .route("/enhance_transcription", post(enhance_transcription))
        .route("/translate_text", post(translate_text))
        .route("/synthesize_speech", post(synthesize_speech))
}

/// Full application: routes, CORS, request tracing and state
pub fn build_app(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.system_config)?;

    Ok(Router::new()
        .merge(create_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state))
}

/// Allow-list CORS from config, permissive when the list is empty
pub fn cors_layer(config: &SystemConfig) -> anyhow::Result<CorsLayer> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", origin, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn enhance_transcription(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, ApiError> {
    let enhanced_text = state.relay.enhance(&request).await?;
    Ok(Json(EnhanceResponse { enhanced_text }))
}

async fn translate_text(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let translated_text = state.relay.translate(&request).await?;
    Ok(Json(TranslateResponse { translated_text }))
}

async fn synthesize_speech(
    State(state): State<AppState>,
    request: Result<LenientJson<SynthesizeRequest>, ApiError>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    let LenientJson(request) = request.map_err(ApiError::with_success_flag)?;
    let audio = state
        .relay
        .synthesize(&request)
        .await
        .map_err(|e| ApiError::from(e).with_success_flag())?;
    Ok(Json(SynthesizeResponse { audio, success: true }))
}
