//! HTTP handler receiving Plaid webhooks.
//!
//! - POST /plaidwebhook/{user_id} - Forward a Plaid event to the finances backend

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::webhook::WebhookNotification;
use crate::services::dispatcher;

/// Receive a webhook from Plaid.
///
/// # Endpoint
///
/// `POST /plaidwebhook/{user_id}`
///
/// # Request Body
///
/// ```json
/// {
///   "webhook_type": "TRANSACTIONS",
///   "webhook_code": "TRANSACTIONS_REMOVED",
///   "item_id": "wz666MBjYWTp2PDzzggYhM6oWWmBb",
///   "removed_transactions": ["yBVBEwrPyJs8GvR77N7QTxnGg6wG74H7dEDN6"]
/// }
/// ```
///
/// The body is decoded whatever the `Content-Type` header says. Only the first
/// JSON value is read, and a `null` body counts as an empty notification.
///
/// # Response
///
/// - **Success (200 OK)**: `Content-Type: application/json`, empty body. Also
///   returned when the backend count differs from `new_transactions` and when
///   the code is not one this service handles.
/// - **Error (500)**: `user_id` is not an integer, the body is not a valid
///   notification, or the backend call failed.
///
/// # Process
///
/// 1. Parse `user_id` from the path
/// 2. Decode the JSON body
/// 3. Hand the notification to the dispatcher, which makes at most one backend call
///
/// The dispatch runs on its own task: if the client disconnects, the backend
/// call still runs to completion.
pub async fn receive_webhook(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let span = tracing::info_span!(
        "webhook",
        service = "WebhookController",
        delivery_id = %Uuid::new_v4(),
        user_id = %user_id,
    );

    async move {
        let result: Result<_, AppError> = async {
            let user_id: i64 = user_id.parse().map_err(AppError::MalformedUserId)?;

            let notification =
                WebhookNotification::from_body(&body).map_err(AppError::MalformedPayload)?;

            tracing::info!(
                code = %notification.code,
                kind = %notification.kind,
                new_count = notification.new_transaction_count,
                removed_count = notification.removed_count(),
                "Incoming Webhook"
            );

            // Detached so a dropped client connection cannot abort an in-flight backend call
            let backend = state.backend.clone();
            tokio::spawn(
                async move { dispatcher::dispatch(backend.as_ref(), user_id, &notification).await }
                    .in_current_span(),
            )
            .await
            .map_err(AppError::DispatchTaskFailed)??;

            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")]))
        }
        .await;

        result.inspect_err(AppError::log)
    }
    .instrument(span)
    .await
}
