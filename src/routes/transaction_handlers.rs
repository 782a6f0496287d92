use crate::db::TransactionFilter;
use crate::error::{AppError, AppResult};
use crate::models::{
    is_valid_kind, CreateTransactionRequest, PaginatedResponse, TransactionResponse,
    UpdateTransactionRequest,
};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use super::helpers::{extract_claims, user_id_from_claims};
use super::types::ListTransactionsQuery;
use super::AppState;

/// Create a transaction (requires authentication)
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateTransactionRequest>,
) -> AppResult<impl IntoResponse> {
    let claims = extract_claims(&headers, &state.auth_service)?;
    let user_id = user_id_from_claims(&claims)?;

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !is_valid_kind(&payload.kind) {
        return Err(AppError::Validation(format!(
            "Kind must be one of: credit, expense (got '{}')",
            payload.kind
        )));
    }

    let entry = state.repository.create_transaction(user_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(entry))))
}

/// List own transactions with optional date-range and kind filters
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTransactionsQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let claims = extract_claims(&headers, &state.auth_service)?;
    let user_id = user_id_from_claims(&claims)?;

    if let Some(kind) = &query.kind {
        if !is_valid_kind(kind) {
            return Err(AppError::Validation(format!(
                "Kind must be one of: credit, expense (got '{}')",
                kind
            )));
        }
    }

    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let filter = TransactionFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        kind: query.kind,
        limit,
        offset,
    };

    let entries = state.repository.list_transactions(user_id, &filter).await?;
    let total = state.repository.count_transactions(user_id, &filter).await?;
    let responses: Vec<TransactionResponse> = entries.into_iter().map(Into::into).collect();

    Ok(Json(PaginatedResponse::new(responses, total, limit, offset)))
}

/// Fetch a single transaction (requires authentication)
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let claims = extract_claims(&headers, &state.auth_service)?;
    let user_id = user_id_from_claims(&claims)?;

    let entry = state
        .repository
        .get_transaction(user_id, id)
        .await?
        .ok_or(AppError::TransactionNotFound(id))?;

    Ok(Json(TransactionResponse::from(entry)))
}

/// Update a transaction in place (requires authentication)
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> AppResult<impl IntoResponse> {
    let claims = extract_claims(&headers, &state.auth_service)?;
    let user_id = user_id_from_claims(&claims)?;

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(kind) = &payload.kind {
        if !is_valid_kind(kind) {
            return Err(AppError::Validation(format!(
                "Kind must be one of: credit, expense (got '{}')",
                kind
            )));
        }
    }

    let entry = state
        .repository
        .update_transaction(user_id, id, &payload)
        .await?
        .ok_or(AppError::TransactionNotFound(id))?;

    Ok(Json(TransactionResponse::from(entry)))
}

/// Delete a transaction (requires authentication)
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let claims = extract_claims(&headers, &state.auth_service)?;
    let user_id = user_id_from_claims(&claims)?;

    let deleted = state.repository.delete_transaction(user_id, id).await?;

    if !deleted {
        return Err(AppError::TransactionNotFound(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
