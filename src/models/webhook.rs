//! Plaid webhook models and the dispatch requests derived from them.
//!
//! This module defines:
//! - `WebhookNotification`: JSON body Plaid posts to `/plaidwebhook/{user_id}`
//! - `WebhookCode`: the recognized `webhook_code` values
//! - `DispatchRequest`: the single backend command a notification maps to
//!
//! # Webhook Flow
//!
//! 1. Plaid posts a notification for a linked item
//! 2. The receiver parses the user id from the path and the body into a `WebhookNotification`
//! 3. `DispatchRequest::from_notification` picks the backend call (or none)
//! 4. The dispatcher issues that call and logs the outcome

use serde::{Deserialize, Deserializer};

/// Inbound webhook notification from Plaid.
///
/// Absent fields take their zero value and unknown fields are ignored.
///
/// # JSON Example
///
/// ```json
/// {
///   "webhook_type": "TRANSACTIONS",
///   "webhook_code": "DEFAULT_UPDATE",
///   "item_id": "wz666MBjYWTp2PDzzggYhM6oWWmBb",
///   "new_transactions": 3
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookNotification {
    /// Event code, drives which backend call is made
    #[serde(rename = "webhook_code", default, deserialize_with = "null_as_default")]
    pub code: WebhookCode,

    /// Event family (e.g. "TRANSACTIONS"), used only for logging
    #[serde(rename = "webhook_type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    /// Plaid item the event refers to
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_id: String,

    /// Number of transactions Plaid says were added
    #[serde(rename = "new_transactions", default, deserialize_with = "null_as_default")]
    pub new_transaction_count: i64,

    /// Ids of transactions Plaid removed, in the order Plaid sent them
    #[serde(rename = "removed_transactions", default, deserialize_with = "null_as_default")]
    pub removed_transaction_ids: Vec<String>,
}

/// Plaid sends explicit `null` for fields that do not apply to an event.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl WebhookNotification {
    /// Decode a request body.
    ///
    /// Only the first JSON value is read; anything after it is ignored. A
    /// literal `null` body decodes to an empty notification. An empty body is
    /// an error.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Self>>();

        match values.next() {
            Some(first) => first.map(Option::unwrap_or_default),
            // No value at all: let the regular decoder produce its EOF error
            None => serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default),
        }
    }

    /// Number of removed transaction ids carried by the notification.
    pub fn removed_count(&self) -> usize {
        self.removed_transaction_ids.len()
    }
}

/// Recognized `webhook_code` values.
///
/// Anything Plaid sends that is not one of the handled codes is kept verbatim
/// in `Unrecognized` so it can still be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookCode {
    HistoricalUpdate,
    DefaultUpdate,
    TransactionsRemoved,
    Unrecognized(String),
}

impl WebhookCode {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookCode::HistoricalUpdate => "HISTORICAL_UPDATE",
            WebhookCode::DefaultUpdate => "DEFAULT_UPDATE",
            WebhookCode::TransactionsRemoved => "TRANSACTIONS_REMOVED",
            WebhookCode::Unrecognized(code) => code,
        }
    }
}

impl Default for WebhookCode {
    fn default() -> Self {
        WebhookCode::Unrecognized(String::new())
    }
}

impl From<String> for WebhookCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "HISTORICAL_UPDATE" => WebhookCode::HistoricalUpdate,
            "DEFAULT_UPDATE" => WebhookCode::DefaultUpdate,
            "TRANSACTIONS_REMOVED" => WebhookCode::TransactionsRemoved,
            _ => WebhookCode::Unrecognized(code),
        }
    }
}

impl std::fmt::Display for WebhookCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WebhookCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(WebhookCode::from)
    }
}

/// Parameters for the two "add transactions" backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTransactions {
    pub user_id: i64,
    pub item_id: String,
    pub expected_count: i64,
}

/// Parameters for the "remove transactions" backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveTransactions {
    pub user_id: i64,
    pub removed_transaction_ids: Vec<String>,
}

/// The one backend command a notification translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchRequest {
    HistoricalUpdate(AddTransactions),
    DefaultUpdate(AddTransactions),
    TransactionsRemoved(RemoveTransactions),
}

impl DispatchRequest {
    /// Build the backend command for a notification.
    ///
    /// Returns `None` for unrecognized codes: those are accepted and ignored.
    pub fn from_notification(user_id: i64, notification: &WebhookNotification) -> Option<Self> {
        let add = || AddTransactions {
            user_id,
            item_id: notification.item_id.clone(),
            expected_count: notification.new_transaction_count,
        };

        match &notification.code {
            WebhookCode::HistoricalUpdate => Some(DispatchRequest::HistoricalUpdate(add())),
            WebhookCode::DefaultUpdate => Some(DispatchRequest::DefaultUpdate(add())),
            WebhookCode::TransactionsRemoved => {
                Some(DispatchRequest::TransactionsRemoved(RemoveTransactions {
                    user_id,
                    removed_transaction_ids: notification.removed_transaction_ids.clone(),
                }))
            }
            WebhookCode::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> WebhookNotification {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_plaid_field_names() {
        let notification = parse(json!({
            "webhook_type": "TRANSACTIONS",
            "webhook_code": "HISTORICAL_UPDATE",
            "item_id": "item-1",
            "new_transactions": 231,
            "removed_transactions": ["a", "b"],
            "error": null
        }));

        assert_eq!(notification.code, WebhookCode::HistoricalUpdate);
        assert_eq!(notification.kind, "TRANSACTIONS");
        assert_eq!(notification.item_id, "item-1");
        assert_eq!(notification.new_transaction_count, 231);
        assert_eq!(notification.removed_transaction_ids, vec!["a", "b"]);
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let notification = parse(json!({}));

        assert_eq!(notification.code, WebhookCode::Unrecognized(String::new()));
        assert!(notification.kind.is_empty());
        assert!(notification.item_id.is_empty());
        assert_eq!(notification.new_transaction_count, 0);
        assert_eq!(notification.removed_count(), 0);
    }

    #[test]
    fn explicit_nulls_take_zero_values() {
        let notification = parse(json!({
            "webhook_code": "DEFAULT_UPDATE",
            "item_id": null,
            "new_transactions": null,
            "removed_transactions": null
        }));

        assert_eq!(notification.code, WebhookCode::DefaultUpdate);
        assert!(notification.item_id.is_empty());
        assert_eq!(notification.new_transaction_count, 0);
        assert!(notification.removed_transaction_ids.is_empty());
    }

    #[test]
    fn null_body_is_an_empty_notification() {
        let notification = WebhookNotification::from_body(b"null").unwrap();

        assert_eq!(notification.code, WebhookCode::Unrecognized(String::new()));
        assert_eq!(notification.removed_count(), 0);
    }

    #[test]
    fn data_after_first_value_is_ignored() {
        let notification = WebhookNotification::from_body(
            br#"{"webhook_code":"DEFAULT_UPDATE","item_id":"i"} {"webhook_code":"x"}"#,
        )
        .unwrap();

        assert_eq!(notification.code, WebhookCode::DefaultUpdate);
        assert_eq!(notification.item_id, "i");
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(WebhookNotification::from_body(b"").is_err());
        assert!(WebhookNotification::from_body(b"  \n").is_err());
    }

    #[test]
    fn truncated_body_is_rejected() {
        assert!(WebhookNotification::from_body(br#"{"webhook_code": "DEFAULT_UPDATE","#).is_err());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result = serde_json::from_value::<WebhookNotification>(json!({
            "webhook_code": "DEFAULT_UPDATE",
            "new_transactions": "three"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn unknown_codes_are_kept_verbatim() {
        let code = WebhookCode::from("INITIAL_UPDATE".to_string());

        assert_eq!(code, WebhookCode::Unrecognized("INITIAL_UPDATE".to_string()));
        assert_eq!(code.to_string(), "INITIAL_UPDATE");
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!(
            WebhookCode::from("default_update".to_string()),
            WebhookCode::Unrecognized("default_update".to_string())
        );
    }

    #[test]
    fn update_codes_carry_item_and_expected_count() {
        let notification = parse(json!({
            "webhook_code": "DEFAULT_UPDATE",
            "item_id": "item-9",
            "new_transactions": 4
        }));

        assert_eq!(
            DispatchRequest::from_notification(42, &notification),
            Some(DispatchRequest::DefaultUpdate(AddTransactions {
                user_id: 42,
                item_id: "item-9".to_string(),
                expected_count: 4,
            }))
        );
    }

    #[test]
    fn removed_code_preserves_id_order() {
        let notification = parse(json!({
            "webhook_code": "TRANSACTIONS_REMOVED",
            "item_id": "ignored",
            "removed_transactions": ["z", "a", "m"]
        }));

        assert_eq!(
            DispatchRequest::from_notification(7, &notification),
            Some(DispatchRequest::TransactionsRemoved(RemoveTransactions {
                user_id: 7,
                removed_transaction_ids: vec!["z".into(), "a".into(), "m".into()],
            }))
        );
    }

    #[test]
    fn unrecognized_code_yields_no_request() {
        let notification = parse(json!({ "webhook_code": "UNKNOWN_EVENT" }));

        assert_eq!(DispatchRequest::from_notification(1, &notification), None);
    }
}
