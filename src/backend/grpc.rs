//! gRPC implementation of [`FinanceBackend`].
//!
//! This module handles:
//! - Building the channel to the finances service (TLS with a private CA, or plaintext)
//! - Attaching the access token through [`AccessToken`]
//! - Issuing the three unary calls and unwrapping their responses

use async_trait::async_trait;
use tonic::{
    Request, Status,
    client::Grpc,
    codec::ProstCodec,
    codegen::http::uri::{InvalidUri, PathAndQuery},
    metadata::errors::InvalidMetadataValue,
    service::interceptor::InterceptedService,
    transport::{Certificate, Channel, ClientTlsConfig, Endpoint},
};

use super::{
    BackendError, BackendMethod, FinanceBackend,
    auth::AccessToken,
    proto::{
        AddFinancialTransactionsRequest, AddFinancialTransactionsResponse,
        AddHistoricalFinancialTransactionsRequest, AddHistoricalFinancialTransactionsResponse,
        RemoveFinancialTransactionsRequest, RemoveFinancialTransactionsResponse,
    },
};
use crate::{
    config::Config,
    models::webhook::{AddTransactions, RemoveTransactions},
};

/// Errors raised while setting up the backend channel.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid backend address: {0}")]
    InvalidAddress(#[from] InvalidUri),

    #[error("failed to read CA certificate {path}")]
    ReadCaCertificate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TLS configuration: {0}")]
    Tls(#[from] tonic::transport::Error),

    #[error("access token is not a valid header value")]
    InvalidAccessToken(#[from] InvalidMetadataValue),
}

type AuthenticatedChannel = InterceptedService<Channel, AccessToken>;

/// Thin client for `plaidfinances.PlaidFinancesService`.
#[derive(Clone)]
pub struct PlaidFinancesClient {
    inner: Grpc<AuthenticatedChannel>,
}

impl PlaidFinancesClient {
    pub fn new(channel: Channel, token: AccessToken) -> Self {
        Self {
            inner: Grpc::new(InterceptedService::new(channel, token)),
        }
    }

    async fn unary<Req, Resp>(&mut self, method: BackendMethod, message: Req) -> Result<Resp, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {e}")))?;

        let response = self
            .inner
            .unary(
                Request::new(message),
                PathAndQuery::from_static(method.path()),
                ProstCodec::<Req, Resp>::default(),
            )
            .await?;

        Ok(response.into_inner())
    }

    pub async fn add_historical_financial_transactions(
        &mut self,
        request: AddHistoricalFinancialTransactionsRequest,
    ) -> Result<AddHistoricalFinancialTransactionsResponse, Status> {
        self.unary(BackendMethod::AddHistoricalFinancialTransactions, request)
            .await
    }

    pub async fn add_financial_transactions(
        &mut self,
        request: AddFinancialTransactionsRequest,
    ) -> Result<AddFinancialTransactionsResponse, Status> {
        self.unary(BackendMethod::AddFinancialTransactions, request)
            .await
    }

    pub async fn remove_financial_transactions(
        &mut self,
        request: RemoveFinancialTransactionsRequest,
    ) -> Result<RemoveFinancialTransactionsResponse, Status> {
        self.unary(BackendMethod::RemoveFinancialTransactions, request)
            .await
    }
}

/// Production [`FinanceBackend`] talking gRPC to the finances service.
#[derive(Clone)]
pub struct GrpcFinanceBackend {
    client: PlaidFinancesClient,
}

impl GrpcFinanceBackend {
    pub fn new(client: PlaidFinancesClient) -> Self {
        Self { client }
    }

    /// Build the backend from configuration without connecting.
    ///
    /// The channel connects on first use, so the service starts even if the
    /// finances server is not up yet; calls made before it is reachable fail.
    ///
    /// # Errors
    ///
    /// - `InvalidAddress`: `API_SERVER_ADDRESS` is not a valid authority
    /// - `ReadCaCertificate`: the CA file cannot be read
    /// - `Tls`: the TLS settings are rejected
    /// - `InvalidAccessToken`: the token cannot be sent as metadata
    pub fn connect_lazy(config: &Config) -> Result<Self, ConnectError> {
        let endpoint = endpoint(config)?;
        let token = AccessToken::new(config.backend_access_token())?;

        tracing::info!(
            address = %config.api_server_address,
            tls = config.backend_tls_enabled(),
            authenticated = config.backend_access_token().is_some(),
            "Finances backend channel configured"
        );

        Ok(Self::new(PlaidFinancesClient::new(
            endpoint.connect_lazy(),
            token,
        )))
    }
}

fn endpoint(config: &Config) -> Result<Endpoint, ConnectError> {
    let scheme = if config.backend_tls_enabled() {
        "https"
    } else {
        "http"
    };
    let endpoint = Channel::from_shared(format!("{scheme}://{}", config.api_server_address))?;

    let Some(ca_path) = config
        .api_server_tls_ca_path
        .as_deref()
        .filter(|path| !path.is_empty())
    else {
        return Ok(endpoint);
    };

    let pem = std::fs::read_to_string(ca_path).map_err(|source| {
        ConnectError::ReadCaCertificate {
            path: ca_path.to_string(),
            source,
        }
    })?;

    let mut tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem));
    if let Some(domain) = config
        .api_server_tls_domain
        .as_deref()
        .filter(|domain| !domain.is_empty())
    {
        tls = tls.domain_name(domain);
    }

    Ok(endpoint.tls_config(tls)?)
}

#[async_trait]
impl FinanceBackend for GrpcFinanceBackend {
    async fn add_historical_financial_transactions(
        &self,
        request: AddTransactions,
    ) -> Result<i64, BackendError> {
        let response = self
            .client
            .clone()
            .add_historical_financial_transactions(request.into())
            .await?;

        Ok(response.new_transactions)
    }

    async fn add_financial_transactions(
        &self,
        request: AddTransactions,
    ) -> Result<i64, BackendError> {
        let response = self
            .client
            .clone()
            .add_financial_transactions(request.into())
            .await?;

        Ok(response.new_transactions)
    }

    async fn remove_financial_transactions(
        &self,
        request: RemoveTransactions,
    ) -> Result<(), BackendError> {
        self.client
            .clone()
            .remove_financial_transactions(request.into())
            .await?;

        Ok(())
    }
}
