//! Webhook dispatcher - maps a notification to at most one backend call.
//!
//! This service handles:
//! - Choosing the backend procedure from the webhook code
//! - Building its parameters from the notification and user id
//! - Comparing the backend's new-transaction count with Plaid's count
//!
//! # Outcomes
//!
//! A count mismatch is reported (WARN log with `mismatch = true`, and in the
//! returned [`DispatchOutcome`]) but is not an error. Unrecognized codes are
//! accepted without calling the backend.

use crate::{
    backend::{BackendMethod, FinanceBackend},
    error::AppError,
    models::webhook::{DispatchRequest, WebhookNotification},
};

/// What the dispatcher did with a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// One of the two "add" procedures ran.
    Added {
        method: BackendMethod,
        expected: i64,
        actual: i64,
    },

    /// Transactions were removed. No count is reported back for removals.
    Removed { count: usize },

    /// The code is not one this service handles; nothing was called.
    Ignored { code: String },
}

impl DispatchOutcome {
    /// True when the backend added a different number of transactions than Plaid announced.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, DispatchOutcome::Added { expected, actual, .. } if expected != actual)
    }
}

/// Dispatch a parsed notification for `user_id`.
///
/// # Process
///
/// 1. Derive the `DispatchRequest` for the notification's code
/// 2. Issue exactly that one backend call (or none for unrecognized codes)
/// 3. For the add procedures, compare the returned count with the declared one
///
/// # Errors
///
/// - `BackendCallFailed`: the backend call failed; carries the method name
pub async fn dispatch(
    backend: &dyn FinanceBackend,
    user_id: i64,
    notification: &WebhookNotification,
) -> Result<DispatchOutcome, AppError> {
    match DispatchRequest::from_notification(user_id, notification) {
        Some(DispatchRequest::HistoricalUpdate(request)) => {
            let method = BackendMethod::AddHistoricalFinancialTransactions;
            let expected = request.expected_count;
            let actual = backend
                .add_historical_financial_transactions(request)
                .await
                .map_err(|source| AppError::BackendCallFailed { method, source })?;

            Ok(added(method, notification, expected, actual))
        }
        Some(DispatchRequest::DefaultUpdate(request)) => {
            let method = BackendMethod::AddFinancialTransactions;
            let expected = request.expected_count;
            let actual = backend
                .add_financial_transactions(request)
                .await
                .map_err(|source| AppError::BackendCallFailed { method, source })?;

            Ok(added(method, notification, expected, actual))
        }
        Some(DispatchRequest::TransactionsRemoved(request)) => {
            let method = BackendMethod::RemoveFinancialTransactions;
            let count = request.removed_transaction_ids.len();
            backend
                .remove_financial_transactions(request)
                .await
                .map_err(|source| AppError::BackendCallFailed { method, source })?;

            tracing::info!(
                code = %notification.code,
                kind = %notification.kind,
                removed_count = count,
                "Webhook Success"
            );

            Ok(DispatchOutcome::Removed { count })
        }
        // Plaid sends many codes this service does not act on; they are accepted as no-ops.
        None => {
            tracing::debug!(
                code = %notification.code,
                kind = %notification.kind,
                "Webhook ignored"
            );

            Ok(DispatchOutcome::Ignored {
                code: notification.code.to_string(),
            })
        }
    }
}

fn added(
    method: BackendMethod,
    notification: &WebhookNotification,
    expected: i64,
    actual: i64,
) -> DispatchOutcome {
    let outcome = DispatchOutcome::Added {
        method,
        expected,
        actual,
    };

    if outcome.is_mismatch() {
        tracing::warn!(
            method = %method,
            code = %notification.code,
            kind = %notification.kind,
            mismatch = true,
            expected,
            actual,
            "Webhook Mismatch"
        );
    } else {
        tracing::info!(
            method = %method,
            code = %notification.code,
            kind = %notification.kind,
            new_count = actual,
            "Webhook Success"
        );
    }

    outcome
}
