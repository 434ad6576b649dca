use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;

use hydro_core::GardenError;
use hydro_core::GardenService;
use hydro_core::diagnostic::{Diagnosis, TriageState};
use hydro_core::error::kind_of;
use hydro_core::guide::{self, Article};
use hydro_core::models::{
    Cause, ChecklistRecord, ChecklistView, DiagnosticRecord, Duration, ExportData, GlobalStats,
    LightNeed, NewPlant, Orientation, Plan, Plant, PlantCategory, Problem, ProfileSummary,
    Selection,
};
use hydro_core::nutrients::Dosage;
use hydro_core::recommend::Recommendation;

const BODY_LIMIT: usize = 1024 * 1024; // 1 MB

#[derive(Clone)]
struct AppState {
    svc: Arc<Mutex<GardenService>>,
    api_key: Option<String>,
}

impl AppState {
    fn svc(&self) -> MutexGuard<'_, GardenService> {
        self.svc
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// --- Request / Response types ---

#[derive(Deserialize)]
struct NutrientRequest {
    volume_liters: f64,
    #[serde(default = "default_category")]
    plant: PlantCategory,
}

fn default_category() -> PlantCategory {
    PlantCategory::Lettuce
}

#[derive(Deserialize)]
struct LightRequest {
    orientation: Orientation,
    #[serde(default = "default_need")]
    need: LightNeed,
}

fn default_need() -> LightNeed {
    LightNeed::Medium
}

#[derive(Serialize)]
struct LightResponse {
    recommendation: String,
}

#[derive(Deserialize)]
struct ProblemRequest {
    problem: Problem,
}

#[derive(Deserialize)]
struct CauseRequest {
    cause: Cause,
}

#[derive(Deserialize)]
struct DurationRequest {
    duration: Duration,
}

#[derive(Serialize)]
struct TriageResponse {
    step: u8,
    triage: TriageState,
    cause_options: Vec<Cause>,
}

#[derive(Deserialize)]
struct CreatePlantRequest {
    name: String,
    #[serde(default = "default_plant_category")]
    category: PlantCategory,
    planting_date: Option<String>,
}

fn default_plant_category() -> PlantCategory {
    PlantCategory::Other
}

#[derive(Deserialize, Default)]
struct PhotoRequest {
    date: Option<String>,
}

#[derive(Serialize)]
struct PlantView {
    #[serde(flatten)]
    plant: Plant,
    days_since_planting: i64,
    growth_progress: f64,
}

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct TaskRequest {
    done: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Error handling ---

enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match kind_of(&err) {
            Some(GardenError::Validation(msg)) => Self::BadRequest(msg.clone()),
            Some(GardenError::NotFound(msg)) => Self::NotFound(msg.clone()),
            Some(GardenError::State(msg)) => Self::Conflict(msg.clone()),
            None => Self::Internal(err),
        }
    }
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, ApiError> {
    match date {
        None => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest(format!("Invalid date '{s}'. Use YYYY-MM-DD"))),
    }
}

// --- Middleware ---

async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(ref expected_key) = state.api_key {
        let authorized = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected_key);

        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid or missing API key".to_string(),
                }),
            )
                .into_response();
        }
    }
    next.run(request).await
}

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'"),
    );
    response
}

// --- Wizard and calculators ---

async fn recommend(
    State(state): State<AppState>,
    Json(selection): Json<Selection>,
) -> Json<Recommendation> {
    Json(state.svc().recommend(&selection))
}

async fn save_plan(
    State(state): State<AppState>,
    Json(selection): Json<Selection>,
) -> Result<(StatusCode, Json<Plan>), ApiError> {
    let plan = state.svc().save_plan(&selection)?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, ApiError> {
    let svc = state.svc();
    Ok(Json(svc.saved_plans()?.to_vec()))
}

async fn calculate_nutrients(
    State(state): State<AppState>,
    Json(req): Json<NutrientRequest>,
) -> Result<Json<Dosage>, ApiError> {
    let dosage = state
        .svc()
        .calculate_nutrients(req.volume_liters, req.plant)?;
    Ok(Json(dosage))
}

async fn light_recommendation(
    State(state): State<AppState>,
    Json(req): Json<LightRequest>,
) -> Json<LightResponse> {
    Json(LightResponse {
        recommendation: state.svc().light_recommendation(req.orientation, req.need),
    })
}

// --- Triage ---

fn triage_view(svc: &GardenService) -> TriageResponse {
    let triage = svc.triage_state().clone();
    TriageResponse {
        step: triage.step(),
        triage,
        cause_options: svc.triage_cause_options().to_vec(),
    }
}

async fn get_triage(State(state): State<AppState>) -> Json<TriageResponse> {
    Json(triage_view(&state.svc()))
}

async fn triage_problem(
    State(state): State<AppState>,
    Json(req): Json<ProblemRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let mut svc = state.svc();
    svc.triage_select_problem(req.problem)?;
    Ok(Json(triage_view(&svc)))
}

async fn triage_cause(
    State(state): State<AppState>,
    Json(req): Json<CauseRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let mut svc = state.svc();
    svc.triage_select_cause(req.cause)?;
    Ok(Json(triage_view(&svc)))
}

async fn triage_duration(
    State(state): State<AppState>,
    Json(req): Json<DurationRequest>,
) -> Result<Json<Diagnosis>, ApiError> {
    let diagnosis = state.svc().triage_select_duration(req.duration)?;
    Ok(Json(diagnosis))
}

async fn triage_back(State(state): State<AppState>) -> Result<Json<TriageResponse>, ApiError> {
    let mut svc = state.svc();
    svc.triage_back()?;
    Ok(Json(triage_view(&svc)))
}

async fn triage_restart(State(state): State<AppState>) -> Json<TriageResponse> {
    let mut svc = state.svc();
    svc.triage_restart();
    Json(triage_view(&svc))
}

async fn save_diagnosis(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DiagnosticRecord>), ApiError> {
    let record = state.svc().save_diagnosis()?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn diagnostic_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiagnosticRecord>>, ApiError> {
    let svc = state.svc();
    Ok(Json(svc.diagnostic_history()?.to_vec()))
}

// --- Garden ---

async fn list_plants(State(state): State<AppState>) -> Json<Vec<PlantView>> {
    let today = Utc::now().date_naive();
    let svc = state.svc();
    let views = svc
        .plants()
        .iter()
        .map(|p| PlantView {
            days_since_planting: p.days_since_planting(today),
            growth_progress: p.growth_progress(today),
            plant: p.clone(),
        })
        .collect();
    Json(views)
}

async fn create_plant(
    State(state): State<AppState>,
    Json(req): Json<CreatePlantRequest>,
) -> Result<(StatusCode, Json<Plant>), ApiError> {
    let planting_date = parse_date(req.planting_date.as_deref())?;
    let plant = state.svc().add_plant(NewPlant {
        name: req.name,
        planting_date,
        category: req.category,
    })?;
    Ok((StatusCode::CREATED, Json(plant)))
}

async fn add_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<PhotoRequest>>,
) -> Result<StatusCode, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let date = parse_date(req.date.as_deref())?;
    state.svc().add_photo(&id, date)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.svc().remove_plant(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Account ---

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileSummary>), ApiError> {
    let mut svc = state.svc();
    svc.register(&req.name, &req.email, &req.password, &req.confirm_password)?;
    let summary = svc.profile_summary(Utc::now())?;
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut svc = state.svc();
    let outcome = svc.login(&req.email, &req.password)?;
    Ok(Json(serde_json::json!({
        "id": outcome.user.id,
        "name": outcome.user.name,
        "migrated_plants": outcome.migrated_plants,
    })))
}

async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.svc().logout()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn profile(State(state): State<AppState>) -> Result<Json<ProfileSummary>, ApiError> {
    let summary = state.svc().profile_summary(Utc::now())?;
    Ok(Json(summary))
}

async fn export_profile(State(state): State<AppState>) -> Result<Json<ExportData>, ApiError> {
    let data = state.svc().export_profile(Utc::now())?;
    Ok(Json(data))
}

async fn global_stats(State(state): State<AppState>) -> Json<GlobalStats> {
    Json(state.svc().global_stats())
}

// --- Guide ---

async fn list_articles() -> Json<&'static [Article]> {
    Json(guide::ARTICLES.as_slice())
}

async fn get_article(Path(topic): Path<String>) -> Result<Json<&'static Article>, ApiError> {
    let article = guide::article(&topic).map_err(anyhow::Error::from)?;
    Ok(Json(article))
}

// --- Checklist ---

async fn get_checklist(State(state): State<AppState>) -> Json<ChecklistView> {
    Json(state.svc().checklist())
}

async fn set_task(
    State(state): State<AppState>,
    Path(task): Path<String>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<ChecklistView>, ApiError> {
    let view = state.svc().set_task(&task, req.done)?;
    Ok(Json(view))
}

async fn reset_checklist(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.svc().reset_checklist()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn save_checklist(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ChecklistRecord>), ApiError> {
    let record = state.svc().save_checklist()?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn checklist_history(State(state): State<AppState>) -> Json<Vec<ChecklistRecord>> {
    Json(state.svc().checklist_history().to_vec())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/recommend", post(recommend))
        .route("/api/plans", post(save_plan).get(list_plans))
        .route("/api/nutrients", post(calculate_nutrients))
        .route("/api/light", post(light_recommendation))
        .route("/api/triage", get(get_triage))
        .route("/api/triage/problem", post(triage_problem))
        .route("/api/triage/cause", post(triage_cause))
        .route("/api/triage/duration", post(triage_duration))
        .route("/api/triage/back", post(triage_back))
        .route("/api/triage/restart", post(triage_restart))
        .route("/api/triage/save", post(save_diagnosis))
        .route("/api/diagnoses", get(diagnostic_history))
        .route("/api/plants", get(list_plants).post(create_plant))
        .route("/api/plants/{id}", delete(delete_plant))
        .route("/api/plants/{id}/photos", post(add_photo))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/profile", get(profile))
        .route("/api/export", get(export_profile))
        .route("/api/stats", get(global_stats))
        .route("/api/guide", get(list_articles))
        .route("/api/guide/{topic}", get(get_article))
        .route("/api/checklist", get(get_checklist).delete(reset_checklist))
        .route("/api/checklist/save", post(save_checklist))
        .route("/api/checklist/history", get(checklist_history))
        .route("/api/checklist/{task}", put(set_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

// --- Server startup ---

/// First and last four characters of the key, or a placeholder for short keys.
fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 8 {
        return "(set)".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub async fn start_server(
    svc: GardenService,
    port: u16,
    bind: &str,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let state = AppState {
        svc: Arc::new(Mutex::new(svc)),
        api_key: api_key.clone(),
    };

    let app = build_router(state);

    if let Some(ref key) = api_key {
        eprintln!(
            "API key: {} (see api_key file in data directory)",
            key_hint(key)
        );
    } else {
        eprintln!("Warning: Authentication disabled (--no-auth). API is open to anyone.");
    }

    if bind != "127.0.0.1" && bind != "localhost" && api_key.is_none() {
        eprintln!(
            "Warning: Listening on {bind} with no authentication. Any device on your network can access this API."
        );
    }

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    eprintln!("Listening on http://{bind}:{port}");
    tracing::info!(%bind, port, "server started");
    axum::serve(listener, app).await?;

    Ok(())
}
