//! The gateway used when no endpoint is configured.

use async_trait::async_trait;

use super::{Gateway, GatewayError, GatewayRequest};

/// Gateway used when no endpoint is configured: every unknown command is
/// simply not found.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGateway;

#[async_trait]
impl Gateway for OfflineGateway {
    async fn ask(&self, request: &GatewayRequest) -> Result<String, GatewayError> {
        Ok(format!("{}: command not found", request.command))
    }
}
