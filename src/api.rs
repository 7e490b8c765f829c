//! REST API router for the merchant dashboard.
//!
//! Used by the binary and by integration tests. Create with [`create_router`].
//! Uses Extension for state so the router is `Router<()>` and works with `into_make_service()`.
//! All handlers share one session; the session lock is never held across an await.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::dashboard::ProductCatalog;
use crate::date::local_now;
use crate::export;
use crate::feedback::{FeedbackForm, MAX_RATING};
use crate::notice::Notice;
use crate::onboarding::{fetch_country_names, OnboardingForm, StoreProfile};
use crate::persistence::LocalStore;
use crate::table::{ActiveFilter, OrderTable, SaveOutcome, SortKey};
use crate::types::{Order, OrderId, OrderStatus};

/// Per-session state: the order table, the onboarding form and the product catalog.
pub struct Session {
    pub table: OrderTable,
    pub onboarding: OnboardingForm,
    pub catalog: ProductCatalog,
}

/// Shared app state: one session per process.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    config: Arc<AppConfig>,
    http: reqwest::Client,
}

impl AppState {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the REST router over `orders`. Fails if the bundled catalog cannot be read.
pub fn create_router(config: AppConfig, orders: Vec<Order>) -> Result<Router<()>, String> {
    let session = Session {
        table: OrderTable::new(orders),
        onboarding: OnboardingForm::load(LocalStore::new(&config.store_path)),
        catalog: ProductCatalog::bundled()?,
    };
    let state = AppState {
        session: Arc::new(Mutex::new(session)),
        config: Arc::new(config),
        http: reqwest::Client::new(),
    };
    Ok(Router::new()
        .route("/health", get(health))
        .route("/orders", get(list_orders))
        .route("/orders/filter", post(filter_orders))
        .route("/orders/reset", post(reset_filters))
        .route("/orders/sort", post(sort_orders))
        .route("/orders/status", post(stage_status))
        .route("/orders/status/save", post(save_status))
        .route("/orders/status/confirm", post(confirm_status))
        .route("/orders/status/discard", post(discard_status))
        .route("/orders/export", get(export_orders))
        .route("/categories", get(list_categories))
        .route("/dashboard/:category", get(dashboard))
        .route("/feedback", post(submit_feedback))
        .route("/onboarding", get(get_onboarding).post(submit_onboarding))
        .route("/countries", get(list_countries))
        .layer(Extension(state)))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(serde::Serialize)]
struct TableView {
    orders: Vec<Order>,
    active_filter: Option<ActiveFilter>,
    total_orders: usize,
}

fn table_view(table: &OrderTable) -> TableView {
    TableView {
        orders: table.orders().to_vec(),
        active_filter: table.active_filter().cloned(),
        total_orders: table.original_orders().len(),
    }
}

#[derive(serde::Serialize)]
struct NoticeOut {
    notice: Notice,
    table: TableView,
}

fn rejected(status: StatusCode, error: impl serde::Serialize) -> Response {
    (status, Json(serde_json::json!({ "error": error }))).into_response()
}

async fn list_orders(Extension(state): Extension<AppState>) -> Response {
    let guard = state.session();
    (StatusCode::OK, Json(table_view(&guard.table))).into_response()
}

#[derive(serde::Deserialize)]
struct FilterRequest {
    months: i64,
}

async fn filter_orders(
    Extension(state): Extension<AppState>,
    Json(body): Json<FilterRequest>,
) -> Response {
    let mut guard = state.session();
    match guard.table.filter_by_date_range(body.months, local_now()) {
        Ok(notice) => {
            let table = table_view(&guard.table);
            (StatusCode::OK, Json(NoticeOut { notice, table })).into_response()
        }
        Err(notice) => rejected(StatusCode::BAD_REQUEST, notice),
    }
}

async fn reset_filters(Extension(state): Extension<AppState>) -> Response {
    let mut guard = state.session();
    let notice = guard.table.reset_filters();
    let table = table_view(&guard.table);
    (StatusCode::OK, Json(NoticeOut { notice, table })).into_response()
}

#[derive(serde::Deserialize)]
struct SortRequest {
    key: SortKey,
}

async fn sort_orders(
    Extension(state): Extension<AppState>,
    Json(body): Json<SortRequest>,
) -> Response {
    let mut guard = state.session();
    guard.table.sort(body.key, local_now());
    (StatusCode::OK, Json(table_view(&guard.table))).into_response()
}

#[derive(serde::Deserialize)]
struct StageRequest {
    order_id: OrderId,
    status: OrderStatus,
}

async fn stage_status(
    Extension(state): Extension<AppState>,
    Json(body): Json<StageRequest>,
) -> Response {
    let mut guard = state.session();
    match guard.table.stage_status(&body.order_id, body.status) {
        Ok(()) => {
            #[derive(serde::Serialize)]
            struct Out {
                order_id: OrderId,
                status: OrderStatus,
            }
            let out = Out {
                order_id: body.order_id,
                status: body.status,
            };
            (StatusCode::OK, Json(out)).into_response()
        }
        Err(e) => rejected(StatusCode::NOT_FOUND, e),
    }
}

async fn save_status(Extension(state): Extension<AppState>) -> Response {
    let mut guard = state.session();
    #[derive(serde::Serialize)]
    struct Out {
        needs_confirmation: bool,
        changed: usize,
        notice: Option<Notice>,
    }
    let out = match guard.table.save_status_edits() {
        SaveOutcome::NeedsConfirmation { changed } => Out {
            needs_confirmation: true,
            changed,
            notice: None,
        },
        SaveOutcome::NoChanges(notice) => Out {
            needs_confirmation: false,
            changed: 0,
            notice: Some(notice),
        },
    };
    (StatusCode::OK, Json(out)).into_response()
}

async fn confirm_status(Extension(state): Extension<AppState>) -> Response {
    let mut guard = state.session();
    let notice = guard.table.confirm_status_edits();
    let table = table_view(&guard.table);
    (StatusCode::OK, Json(NoticeOut { notice, table })).into_response()
}

async fn discard_status(Extension(state): Extension<AppState>) -> Response {
    let mut guard = state.session();
    guard.table.discard_status_edits();
    (StatusCode::OK, Json(table_view(&guard.table))).into_response()
}

async fn export_orders(Extension(state): Extension<AppState>) -> Response {
    let orders = {
        let guard = state.session();
        guard.table.orders().to_vec()
    };
    let document = export::export_orders(&orders, state.config.watermark_path.as_deref()).await;
    (StatusCode::OK, Json(document)).into_response()
}

async fn list_categories(Extension(state): Extension<AppState>) -> Response {
    let guard = state.session();
    (StatusCode::OK, Json(guard.catalog.categories())).into_response()
}

async fn dashboard(
    Extension(state): Extension<AppState>,
    Path(category): Path<String>,
) -> Response {
    let guard = state.session();
    match guard.catalog.view(&category) {
        Some(view) => (StatusCode::OK, Json(view)).into_response(),
        None => rejected(
            StatusCode::NOT_FOUND,
            format!("Category {} not found", category),
        ),
    }
}

async fn submit_feedback(Json(mut form): Json<FeedbackForm>) -> Response {
    if form.rating > MAX_RATING {
        return rejected(
            StatusCode::BAD_REQUEST,
            format!("rating must be between 0 and {}", MAX_RATING),
        );
    }
    #[derive(serde::Serialize)]
    struct Out {
        notice: Notice,
        form: FeedbackForm,
    }
    match form.submit() {
        Ok(notice) => (StatusCode::OK, Json(Out { notice, form })).into_response(),
        Err(notice) => (StatusCode::BAD_REQUEST, Json(Out { notice, form })).into_response(),
    }
}

async fn get_onboarding(Extension(state): Extension<AppState>) -> Response {
    let guard = state.session();
    (StatusCode::OK, Json(guard.onboarding.profile.clone())).into_response()
}

async fn submit_onboarding(
    Extension(state): Extension<AppState>,
    Json(profile): Json<StoreProfile>,
) -> Response {
    let mut guard = state.session();
    guard.onboarding.profile = profile;
    match guard.onboarding.submit() {
        Ok(submitted) => {
            #[derive(serde::Serialize)]
            struct Out {
                submitted: StoreProfile,
                form: StoreProfile,
            }
            let form = guard.onboarding.profile.clone();
            (StatusCode::OK, Json(Out { submitted, form })).into_response()
        }
        Err(e) => rejected(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn list_countries(Extension(state): Extension<AppState>) -> Response {
    let names = fetch_country_names(&state.http, &state.config.countries_url).await;
    (StatusCode::OK, Json(names)).into_response()
}
