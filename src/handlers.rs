use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::db_store::LibsqlStore;
use crate::error::FinanceError;
use crate::inheritance::Inheritable;
use crate::models::*;
use crate::month::{MonthKey, SystemClock};
use crate::service::FinanceService;

pub type AppService = FinanceService<LibsqlStore, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AppService>,
}

type ApiResult<T> = Result<(StatusCode, Json<T>), (StatusCode, String)>;

pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(root))
        .route("/api/summary/current", get(current_summary))
        .route("/api/summary/{month}", get(monthly_summary))
        .route("/api/config/income/{month}", get(get_income).put(update_income))
        .route(
            "/api/config/daily-budget/{month}",
            get(get_daily_budget).put(update_daily_budget),
        )
        .route("/api/config/pockets", get(list_pockets).post(create_pocket))
        .route(
            "/api/config/pockets/{id}",
            put(update_pocket).delete(delete_pocket),
        )
        .route(
            "/api/fixed-expenses",
            post(create_fixed_expense),
        )
        // {key} is a month on GET and an expense id otherwise
        .route(
            "/api/fixed-expenses/{key}",
            get(list_fixed_expenses)
                .put(update_fixed_expense)
                .delete(delete_fixed_expense),
        )
        .route(
            "/api/fixed-expenses/{key}/status",
            put(update_payment_status),
        )
        .route(
            "/api/daily-expenses",
            post(create_daily_expense),
        )
        .route(
            "/api/daily-expenses/{key}",
            get(list_daily_expenses)
                .put(update_daily_expense)
                .delete(delete_daily_expense),
        )
        .layer(cors)
        .with_state(state)
}

async fn root() -> &'static str {
    "ok"
}

async fn monthly_summary(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<MonthlySummary> {
    let summary = state.service.monthly_summary(&month).await?;
    Ok((StatusCode::OK, Json(summary)))
}

async fn current_summary(State(state): State<AppState>) -> ApiResult<MonthlySummary> {
    let summary = state.service.current_monthly_summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

// Configuration

async fn get_income(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<IncomeResponse> {
    // No salary here or last month: report zero
    let response = match state.service.resolve_salary(&month).await {
        Ok(salary) => IncomeResponse {
            inherited: salary.is_inherited(),
            month: salary.month,
            monthly_amount: salary.monthly_amount,
        },
        Err(FinanceError::NotFound(_)) => IncomeResponse {
            month: MonthKey::parse(&month)?,
            monthly_amount: 0.0,
            inherited: false,
        },
        Err(err) => return Err(err.into()),
    };
    Ok((StatusCode::OK, Json(response)))
}

async fn update_income(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Json(payload): Json<SalaryPayload>,
) -> ApiResult<IncomeResponse> {
    let salary = state
        .service
        .update_salary(&month, payload.monthly_amount)
        .await?;
    tracing::info!(month = %salary.month, "income updated");

    Ok((
        StatusCode::OK,
        Json(IncomeResponse {
            month: salary.month,
            monthly_amount: salary.monthly_amount,
            inherited: false,
        }),
    ))
}

fn daily_budget_response(config: &DailyBudgetConfig, inherited: bool) -> DailyBudgetResponse {
    DailyBudgetResponse {
        month: config.month,
        monthly_budget: config.monthly_budget,
        daily_budget: config.daily_allowance(),
        inherited,
    }
}

async fn get_daily_budget(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<DailyBudgetResponse> {
    // No budget here or last month: report zero
    let (config, inherited) = match state.service.resolve_daily_budget(&month).await {
        Ok(config) => {
            let inherited = config.is_inherited();
            (config, inherited)
        }
        Err(FinanceError::NotFound(_)) => (
            DailyBudgetConfig {
                id: None,
                monthly_budget: 0.0,
                month: MonthKey::parse(&month)?,
            },
            false,
        ),
        Err(err) => return Err(err.into()),
    };

    Ok((StatusCode::OK, Json(daily_budget_response(&config, inherited))))
}

async fn update_daily_budget(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Json(payload): Json<DailyBudgetPayload>,
) -> ApiResult<DailyBudgetResponse> {
    let config = state
        .service
        .update_daily_budget(&month, payload.monthly_budget)
        .await?;
    tracing::info!(month = %config.month, "daily budget updated");

    Ok((StatusCode::OK, Json(daily_budget_response(&config, false))))
}

// Pockets

async fn list_pockets(State(state): State<AppState>) -> ApiResult<Vec<Pocket>> {
    Ok((StatusCode::OK, Json(state.service.pockets().await?)))
}

async fn create_pocket(
    State(state): State<AppState>,
    Json(payload): Json<PocketPayload>,
) -> ApiResult<Pocket> {
    let pocket = state.service.create_pocket(payload).await?;
    tracing::info!(pocket_id = %pocket.id, "pocket created");
    Ok((StatusCode::CREATED, Json(pocket)))
}

async fn update_pocket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PocketPayload>,
) -> ApiResult<Pocket> {
    let pocket = state.service.update_pocket(&id, payload).await?;
    Ok((StatusCode::OK, Json(pocket)))
}

async fn delete_pocket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResponse> {
    state.service.delete_pocket(&id).await?;
    tracing::info!(pocket_id = %id, "pocket deleted");
    Ok((
        StatusCode::OK,
        Json(DeletedResponse {
            id,
            message: "Pocket deleted successfully".to_string(),
        }),
    ))
}

// Fixed expenses

async fn list_fixed_expenses(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Vec<FixedExpenseView>> {
    Ok((StatusCode::OK, Json(state.service.fixed_expenses(&month).await?)))
}

async fn create_fixed_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateFixedExpensePayload>,
) -> ApiResult<FixedExpense> {
    let expense = state.service.create_fixed_expense(payload).await?;
    tracing::info!(expense_id = %expense.id, month = %expense.month, "fixed expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_fixed_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFixedExpensePayload>,
) -> ApiResult<FixedExpense> {
    let expense = state.service.update_fixed_expense(&id, payload).await?;
    Ok((StatusCode::OK, Json(expense)))
}

async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentStatusPayload>,
) -> ApiResult<FixedExpense> {
    let expense = state
        .service
        .update_payment_status(&id, payload.is_paid)
        .await?;
    tracing::info!(expense_id = %expense.id, is_paid = expense.is_paid, "payment status updated");
    Ok((StatusCode::OK, Json(expense)))
}

async fn delete_fixed_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResponse> {
    state.service.delete_fixed_expense(&id).await?;
    Ok((
        StatusCode::OK,
        Json(DeletedResponse {
            id,
            message: "Fixed expense deleted successfully".to_string(),
        }),
    ))
}

// Daily expenses

async fn list_daily_expenses(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Vec<DailyExpense>> {
    Ok((StatusCode::OK, Json(state.service.daily_expenses(&month).await?)))
}

async fn create_daily_expense(
    State(state): State<AppState>,
    Json(payload): Json<DailyExpensePayload>,
) -> ApiResult<DailyExpense> {
    let expense = state.service.create_daily_expense(payload).await?;
    tracing::info!(expense_id = %expense.id, date = %expense.date, "daily expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_daily_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DailyExpensePayload>,
) -> ApiResult<DailyExpense> {
    let expense = state.service.update_daily_expense(&id, payload).await?;
    Ok((StatusCode::OK, Json(expense)))
}

async fn delete_daily_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResponse> {
    state.service.delete_daily_expense(&id).await?;
    Ok((
        StatusCode::OK,
        Json(DeletedResponse {
            id,
            message: "Daily expense deleted successfully".to_string(),
        }),
    ))
}
