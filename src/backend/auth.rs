//! Bearer token authentication for backend calls.
//!
//! The finances service authenticates every RPC with a JWT access token:
//! 1. The token is read from configuration once at startup
//! 2. It is formatted as `Bearer <token>` and validated as ASCII metadata
//! 3. The interceptor attaches it as `authorization` metadata to each outbound call

use tonic::{
    Request, Status,
    metadata::{AsciiMetadataValue, errors::InvalidMetadataValue},
    service::Interceptor,
};

/// Interceptor that attaches the configured access token to every request.
///
/// Without a token requests are forwarded untouched.
#[derive(Clone, Default)]
pub struct AccessToken {
    header: Option<AsciiMetadataValue>,
}

impl AccessToken {
    /// Build the interceptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters that are not valid
    /// in a metadata value (e.g. newlines).
    pub fn new(token: Option<&str>) -> Result<Self, InvalidMetadataValue> {
        let header = token
            .map(|token| format!("Bearer {token}").parse::<AsciiMetadataValue>())
            .transpose()?;

        Ok(Self { header })
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("configured", &self.header.is_some())
            .finish()
    }
}

impl Interceptor for AccessToken {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(header) = &self.header {
            request.metadata_mut().insert("authorization", header.clone());
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_bearer_header() {
        let mut token = AccessToken::new(Some("abc.def.ghi")).unwrap();

        let request = token.call(Request::new(())).unwrap();

        assert_eq!(
            request.metadata().get("authorization").unwrap(),
            "Bearer abc.def.ghi"
        );
    }

    #[test]
    fn leaves_request_alone_without_token() {
        let mut token = AccessToken::new(None).unwrap();

        let request = token.call(Request::new(())).unwrap();

        assert!(request.metadata().get("authorization").is_none());
    }

    #[test]
    fn rejects_token_with_control_characters() {
        assert!(AccessToken::new(Some("bad\ntoken")).is_err());
    }

    #[test]
    fn debug_output_hides_token() {
        let token = AccessToken::new(Some("super-secret")).unwrap();

        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
