//! Finances backend capability.
//!
//! The dispatcher only talks to [`FinanceBackend`]. Production wiring uses
//! [`grpc::GrpcFinanceBackend`], which forwards to the internal
//! `plaidfinances.PlaidFinancesService` gRPC server; tests plug in fakes.

use async_trait::async_trait;

use crate::models::webhook::{AddTransactions, RemoveTransactions};

/// Bearer token interceptor for outbound calls
pub mod auth;
/// tonic client for the finances service
pub mod grpc;
/// Wire messages of the finances service
pub mod proto;

/// Remote procedures the finances service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMethod {
    AddHistoricalFinancialTransactions,
    AddFinancialTransactions,
    RemoveFinancialTransactions,
}

impl BackendMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendMethod::AddHistoricalFinancialTransactions => {
                "AddHistoricalFinancialTransactions"
            }
            BackendMethod::AddFinancialTransactions => "AddFinancialTransactions",
            BackendMethod::RemoveFinancialTransactions => "RemoveFinancialTransactions",
        }
    }

    /// gRPC request path, e.g. `/plaidfinances.PlaidFinancesService/AddFinancialTransactions`.
    pub fn path(self) -> &'static str {
        match self {
            BackendMethod::AddHistoricalFinancialTransactions => {
                "/plaidfinances.PlaidFinancesService/AddHistoricalFinancialTransactions"
            }
            BackendMethod::AddFinancialTransactions => {
                "/plaidfinances.PlaidFinancesService/AddFinancialTransactions"
            }
            BackendMethod::RemoveFinancialTransactions => {
                "/plaidfinances.PlaidFinancesService/RemoveFinancialTransactions"
            }
        }
    }
}

impl std::fmt::Display for BackendMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport failure or an error status returned by the server.
    #[error("rpc failed: {0}")]
    Rpc(#[from] tonic::Status),
}

/// The three remote procedures the dispatcher may invoke.
///
/// Implementations are shared across requests and must not require `&mut self`.
#[async_trait]
pub trait FinanceBackend: Send + Sync {
    /// Import the item's historical transactions. Returns how many were new.
    async fn add_historical_financial_transactions(
        &self,
        request: AddTransactions,
    ) -> Result<i64, BackendError>;

    /// Import the item's latest transactions. Returns how many were new.
    async fn add_financial_transactions(
        &self,
        request: AddTransactions,
    ) -> Result<i64, BackendError>;

    /// Delete the given transactions for the user.
    async fn remove_financial_transactions(
        &self,
        request: RemoveTransactions,
    ) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_end_with_method_name() {
        for method in [
            BackendMethod::AddHistoricalFinancialTransactions,
            BackendMethod::AddFinancialTransactions,
            BackendMethod::RemoveFinancialTransactions,
        ] {
            assert!(method.path().starts_with("/plaidfinances.PlaidFinancesService/"));
            assert!(method.path().ends_with(method.as_str()));
        }
    }
}
