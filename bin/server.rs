// Bank Ledger - Web Server
// REST API over the ledger service, plus the static dashboard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use bank_ledger::{
    Direction, LedgerError, LedgerService, Money, NewTransaction, TransactionFilter,
    TransferRequest, VERSION,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    ledger: Arc<LedgerService>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Error wrapper mapping each ledger error kind to a fixed status code.
struct ApiError(LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LedgerError::InvalidInput(_) | LedgerError::InsufficientFunds { .. } => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            LedgerError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            // Store details stay in the log; the client gets a generic error.
            LedgerError::Store(_) => {
                tracing::error!(error = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let body = json!({ "success": false, "error": message });
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Deserialize)]
struct TransactionQuery {
    account_id: Option<String>,
    category: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct CreateTransactionBody {
    account_id: String,
    #[serde(rename = "type")]
    direction: Direction,
    amount: Money,
    description: String,
    category: String,
    #[serde(default)]
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct TransferBody {
    from_account: String,
    to_account: String,
    amount: Money,
    description: String,
    #[serde(default)]
    date: Option<NaiveDate>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": "bank-ledger",
        "version": VERSION,
    })))
}

/// GET /api/accounts - All accounts with total balance
async fn get_accounts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let overview = state.ledger.accounts()?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// GET /api/accounts/:id - One account with its recent transactions
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.ledger.account(&account_id)?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// GET /api/transactions - Filtered transactions with summary
async fn get_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = TransactionFilter {
        account_id: params.account_id,
        category: params.category,
        start_date: params.start_date,
        end_date: params.end_date,
    };
    let listing = state.ledger.transactions(&filter)?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// POST /api/transactions - Record a single-entry transaction
async fn create_transaction(
    State(state): State<AppState>,
    Json(body): Json<CreateTransactionBody>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.ledger.record_transaction(NewTransaction {
        account_id: body.account_id,
        direction: body.direction,
        amount: body.amount,
        description: body.description,
        category: body.category,
        date: body.date,
    })?;

    let payload = ApiResponse::ok(json!({
        "transaction": outcome.transaction,
        "balance": outcome.balance,
    }));
    Ok((StatusCode::CREATED, Json(payload)))
}

/// GET /api/cards - All cards
async fn get_cards(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let listing = state.ledger.cards()?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// GET /api/summary - Financial summary with category breakdown
async fn get_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let report = state.ledger.summary()?;
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/transfer - Transfer between accounts
async fn post_transfer(
    State(state): State<AppState>,
    Json(body): Json<TransferBody>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.ledger.transfer(TransferRequest {
        from_account: body.from_account,
        to_account: body.to_account,
        amount: body.amount,
        description: body.description,
        date: body.date,
    })?;

    Ok(Json(ApiResponse::ok(json!({
        "new_balance": outcome.new_balance,
        "transactions": outcome.transactions,
    }))))
}

/// GET / - Serve the dashboard
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let db_path =
        std::env::var("BANK_LEDGER_DB").unwrap_or_else(|_| "bank_data.json".to_string());
    let service = Arc::new(LedgerService::open(&db_path));

    match service.init_with_sample_data() {
        Ok(true) => tracing::info!(path = %db_path, "store seeded with sample data"),
        Ok(false) => tracing::info!(path = %db_path, "store opened"),
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize store");
            std::process::exit(1);
        }
    }

    let state = AppState { ledger: service };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/accounts", get(get_accounts))
        .route("/accounts/:id", get(get_account))
        .route(
            "/transactions",
            get(get_transactions).post(create_transaction),
        )
        .route("/cards", get(get_cards))
        .route("/summary", get(get_summary))
        .route("/transfer", post(post_transfer))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    let addr = std::env::var("BANK_LEDGER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!(%addr, "bank-ledger server running");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
