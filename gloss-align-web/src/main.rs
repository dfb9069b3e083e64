use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gloss_align::{
    AlignConfig, AlignError, GoogleTranslateProvider, InMemoryDictionary, Lookup, LookupRequest,
    LookupSession, LookupState, MachineTranslator, MatchedWord, MockMode, MockTranslator,
    RankingMode, ScoredCandidate,
};

/// Path of the JSON dictionary loaded at startup
const DICTIONARY_VAR: &str = "GLOSS_ALIGN_DICTIONARY";

#[derive(Serialize)]
pub struct LookupResponse {
    pub word: String,
    pub state: LookupState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RankingMode>,
    /// Candidates in the order the reader cycles through them
    pub candidates: Vec<ScoredCandidate>,
    pub chosen: Option<String>,
    pub prefer_machine_translation: bool,
    pub translation: Option<String>,
    pub highlight: Option<MatchedWord>,
}

impl LookupResponse {
    fn from_session(session: &LookupSession) -> Self {
        let ranking = session.ranking();
        Self {
            word: session.context().selected_word().to_string(),
            state: session.state(),
            mode: ranking.map(|r| r.mode),
            candidates: ranking
                .map(|r| r.cycle_order().into_iter().cloned().collect())
                .unwrap_or_default(),
            chosen: session.display_text().map(|s| s.to_string()),
            prefer_machine_translation: ranking.is_some_and(|r| r.prefer_machine_translation),
            translation: session.context().translation().map(|t| t.text.clone()),
            highlight: session.highlight().cloned(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub translator: String,
}

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<Lookup>,
    pub translator_name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AlignConfig::from_env()?;

    let dictionary = match std::env::var(DICTIONARY_VAR) {
        Ok(path) => {
            let dictionary = InMemoryDictionary::from_json_file(Path::new(&path))?;
            info!("Loaded {} dictionary entries from {}", dictionary.len(), path);
            dictionary
        }
        Err(_) => {
            warn!("{} not set, starting with an empty dictionary", DICTIONARY_VAR);
            InMemoryDictionary::new()
        }
    };

    let translator: Arc<dyn MachineTranslator> = match GoogleTranslateProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            warn!("{}; falling back to the echo mock translator", e);
            Arc::new(MockTranslator::new(MockMode::Echo))
        }
    };

    let state = AppState {
        translator_name: translator.provider_name().to_string(),
        lookup: Arc::new(Lookup::new(Arc::new(dictionary), translator, config)),
    };

    info!("Starting gloss-align web server");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("🚀 Server running at http://127.0.0.1:3000");

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lookup", post(lookup_word))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        translator: state.translator_name,
    })
}

async fn lookup_word(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<LookupResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Looking up '{}' ({} → {})",
        &request.word, &request.source_language, &request.target_language
    );

    if request.word.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "word cannot be empty".to_string(),
        ));
    }

    let session = state.lookup.run(&request).await.map_err(|e| {
        let status = match e {
            AlignError::InvalidLanguage(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, e.to_string())
    })?;

    let response = LookupResponse::from_session(&session);
    info!(
        "Chose {:?} for '{}' ({} candidates)",
        response.chosen,
        &request.word,
        response.candidates.len()
    );
    Ok(Json(response))
}

fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error }))
}
