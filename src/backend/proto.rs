//! Protobuf messages of `plaidfinances.PlaidFinancesService`.
//!
//! Mirrors `proto/plaidfinances.proto`. Kept by hand so the build needs no `protoc`.

use crate::models::webhook::{AddTransactions, RemoveTransactions};

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddHistoricalFinancialTransactionsRequest {
    #[prost(int64, tag = "1")]
    pub user_id: i64,
    #[prost(string, tag = "2")]
    pub plaid_item_id: String,
    #[prost(int64, tag = "3")]
    pub expected_count: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddHistoricalFinancialTransactionsResponse {
    #[prost(int64, tag = "1")]
    pub new_transactions: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddFinancialTransactionsRequest {
    #[prost(int64, tag = "1")]
    pub user_id: i64,
    #[prost(string, tag = "2")]
    pub plaid_item_id: String,
    #[prost(int64, tag = "3")]
    pub expected_count: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddFinancialTransactionsResponse {
    #[prost(int64, tag = "1")]
    pub new_transactions: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RemoveFinancialTransactionsRequest {
    #[prost(int64, tag = "1")]
    pub user_id: i64,
    #[prost(string, repeated, tag = "2")]
    pub plaid_transaction_ids: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RemoveFinancialTransactionsResponse {}

impl From<AddTransactions> for AddHistoricalFinancialTransactionsRequest {
    fn from(request: AddTransactions) -> Self {
        Self {
            user_id: request.user_id,
            plaid_item_id: request.item_id,
            expected_count: request.expected_count,
        }
    }
}

impl From<AddTransactions> for AddFinancialTransactionsRequest {
    fn from(request: AddTransactions) -> Self {
        Self {
            user_id: request.user_id,
            plaid_item_id: request.item_id,
            expected_count: request.expected_count,
        }
    }
}

impl From<RemoveTransactions> for RemoveFinancialTransactionsRequest {
    fn from(request: RemoveTransactions) -> Self {
        Self {
            user_id: request.user_id,
            plaid_transaction_ids: request.removed_transaction_ids,
        }
    }
}
