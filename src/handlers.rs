use crate::errors::AppError;
use crate::lifecycle;
use crate::models::{
    Account, AdminStats, AuditResponse, LoginRequest, LoginResponse, MonthRevenue, RemoveRequest,
    RemoveResponse, RenewRequest,
};
use crate::state::AppState;
use crate::stats::{compute_stats_at, monthly_revenue_series};
use crate::storage::persist_accounts;
use crate::summary::SummaryError;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

pub async fn index() -> Html<String> {
    Html(render_index(today()))
}

pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let mut accounts = state.accounts.lock().await.clone();
    lifecycle::normalize_statuses(&mut accounts, today());
    Json(accounts)
}

pub async fn add_or_renew(
    State(state): State<AppState>,
    Json(payload): Json<RenewRequest>,
) -> Result<Json<Account>, AppError> {
    let updated = {
        let mut accounts = state.accounts.lock().await;
        let updated = lifecycle::add_or_renew(
            &mut accounts,
            &payload.account,
            &payload.package,
            payload.count,
            payload.unit,
            today(),
        )?;
        save_best_effort(&state, &accounts).await;
        updated
    };

    info!(
        "renewed {} for {} ({} {})",
        updated.account,
        updated.package,
        payload.count,
        payload.unit.label()
    );
    invalidate_audit(&state).await;
    Ok(Json(updated))
}

pub async fn remove_account(
    State(state): State<AppState>,
    Json(payload): Json<RemoveRequest>,
) -> Json<RemoveResponse> {
    let removed = {
        let mut accounts = state.accounts.lock().await;
        let removed = lifecycle::remove(&mut accounts, &payload.account);
        if removed {
            save_best_effort(&state, &accounts).await;
        }
        removed
    };

    if removed {
        info!("removed account {}", payload.account);
        invalidate_audit(&state).await;
    }
    Json(RemoveResponse { removed })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<AdminStats> {
    let accounts = state.accounts.lock().await;
    Json(compute_stats_at(today(), &accounts))
}

pub async fn get_chart(State(state): State<AppState>) -> Json<Vec<MonthRevenue>> {
    let accounts = state.accounts.lock().await;
    Json(monthly_revenue_series(&accounts))
}

/// Returns the audit text for the current collection, kicking off a
/// regeneration when the cache is stale. Clients poll until "ready";
/// while pending they get the previous text, if there was one.
pub async fn get_audit(State(state): State<AppState>) -> Json<AuditResponse> {
    let (token, stale) = {
        let mut audit = state.audit.lock().await;
        if let Some(text) = audit.fresh_text() {
            return Json(AuditResponse {
                status: "ready",
                text: Some(text.to_string()),
            });
        }
        (audit.begin(), audit.any_text().map(str::to_string))
    };

    if let Some(token) = token {
        spawn_audit_generation(state, token);
    }

    Json(AuditResponse {
        status: "pending",
        text: stale,
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Json<LoginResponse> {
    let ok = state.credentials.verify(&payload.username, &payload.password);
    if !ok {
        warn!("rejected login attempt for {:?}", payload.username);
    }
    Json(LoginResponse { ok })
}

/// Mirrors the collection to disk; a failure is logged and swallowed so
/// the in-memory state stays usable for the rest of the session.
async fn save_best_effort(state: &AppState, accounts: &[Account]) {
    if let Err(err) = persist_accounts(&state.data_path, accounts).await {
        error!("failed to persist accounts: {}", err.message);
    }
}

async fn invalidate_audit(state: &AppState) {
    state.audit.lock().await.invalidate();
}

/// Fire-and-forget generation for one cache generation. The generator
/// may block, so it runs off the async threads; the result lands in the
/// cache tagged with its token whenever it finishes.
fn spawn_audit_generation(state: AppState, token: u64) {
    tokio::spawn(async move {
        let accounts = state.accounts.lock().await.clone();
        let generator = state.generator.clone();
        let result = tokio::task::spawn_blocking(move || generator.generate(&accounts))
            .await
            .unwrap_or_else(|err| Err(SummaryError(err.to_string())));

        if let Err(err) = &result {
            warn!("{err}; keeping previous audit text");
        }
        state.audit.lock().await.complete(token, result);
    });
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
