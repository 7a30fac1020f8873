// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! REST API over the [`Engine`].
//!
//! ## Endpoints
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | POST | `/accounts/` | 200, account | 422 |
//! | GET | `/accounts/` | 200, accounts | |
//! | GET | `/accounts/{id}` | 200, account | 404 |
//! | DELETE | `/accounts/{id}` | 200, `{"detail":"Account deleted"}` | 404 |
//! | POST | `/payments/` | 200, payment | 400, 422 |
//! | GET | `/payments/` | 200, payments | |
//! | GET | `/payments/{id}` | 200, payment | 404 |
//!
//! Collection paths are also served without the trailing slash. Every failure
//! body has the shape `{"detail": "<message>"}`.
//!
//! ## Example Usage
//!
//! ```bash
//! curl -X POST http://localhost:8000/accounts/ \
//!   -H "Content-Type: application/json" \
//!   -d '{"type": "personal", "person_name": "Alice", "address": "1 Main St"}'
//!
//! curl -X POST http://localhost:8000/payments/ \
//!   -H "Content-Type: application/json" \
//!   -d '{"from_account_id": 1, "to_account_id": 2, "amount_in_euros": 50, "payment_date": "2024-01-01"}'
//! ```

use crate::account::{Account, NewAccount};
use crate::base::{AccountId, PaymentId};
use crate::engine::Engine;
use crate::error::RecordError;
use crate::payment::{NewPayment, Payment};
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

// === Request/Response DTOs ===

/// Body for failures and for the delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// === Application State ===

/// Shared application state containing the engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

// === Error Handling ===

/// Failure returned by a handler.
#[derive(Debug)]
pub enum ApiError {
    /// Domain failure from the engine
    Record(RecordError),
    /// Request body or path did not match the expected schema
    Validation(String),
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        ApiError::Record(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Record(RecordError::AccountNotFound | RecordError::PaymentNotFound) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Record(RecordError::InvalidAmount | RecordError::InvalidAccountReference) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Record(RecordError::IdsExhausted | RecordError::Persistence(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Record(err) => err.to_string(),
            ApiError::Validation(message) => message,
        };

        if status.is_server_error() {
            error!(%status, %detail, "Request failed");
        } else if status == StatusCode::UNPROCESSABLE_ENTITY {
            warn!(%status, %detail, "Rejected request");
        }

        (status, Json(DetailResponse::new(detail))).into_response()
    }
}

// === Handlers ===

/// POST /accounts/ - Open an account.
async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<NewAccount>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.engine.create_account(request)?))
}

/// GET /accounts/ - List all accounts.
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    Json(state.engine.list_accounts())
}

/// GET /accounts/{id} - Get an account by id.
async fn get_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Account>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.engine.get_account(AccountId(id))?))
}

/// DELETE /accounts/{id} - Delete an account.
async fn delete_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DetailResponse>, ApiError> {
    let Path(id) = id?;
    state.engine.delete_account(AccountId(id))?;
    Ok(Json(DetailResponse::new("Account deleted")))
}

/// POST /payments/ - Record a payment.
async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<NewPayment>, JsonRejection>,
) -> Result<Json<Payment>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.engine.create_payment(request)?))
}

/// GET /payments/ - List all payments.
async fn list_payments(State(state): State<AppState>) -> Json<Vec<Payment>> {
    Json(state.engine.list_payments())
}

/// GET /payments/{id} - Get a payment by id.
///
/// Ids are opaque to clients, so a string that is not a valid id is simply
/// not found.
async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let id: PaymentId = id.parse().map_err(|_| RecordError::PaymentNotFound)?;
    Ok(Json(state.engine.get_payment(&id)?))
}

// === Router ===

/// Builds the router over a shared engine.
pub fn create_router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).delete(delete_account))
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/", get(list_payments).post(create_payment))
        .route("/payments/{id}", get(get_payment))
        .with_state(AppState { engine })
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    engine: Arc<Engine>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Account ledger listening");

    axum::serve(listener, create_router(engine))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Account ledger stopped");
    Ok(())
}
