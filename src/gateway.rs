//! Delivery of user requests to the operator group.

use async_trait::async_trait;

use crate::errors::ForwardError;
use crate::events::Attachment;

/// A request rendered for human operators
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorMessage {
    pub text: String,
    /// Sent as a separate message right after the text
    pub attachment: Option<Attachment>,
}

/// Capability to deliver a message to the fixed operator group
#[async_trait]
pub trait OperatorGateway: Send + Sync {
    async fn forward(&self, message: OperatorMessage) -> Result<(), ForwardError>;
}
