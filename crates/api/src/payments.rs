//! Payment gateway seam.
//!
//! Checkout handlers talk to the gateway through the object-safe
//! [`PaymentGateway`] trait so the HTTP layer never depends on a concrete
//! processor. Production wiring is out of scope; [`SandboxGateway`]
//! approves every well-formed charge and is what development and tests run
//! against.

use async_trait::async_trait;
use meemar_core::error::CoreError;
use meemar_core::payment::validate_amount;
use uuid::Uuid;

/// Receipt returned by a successful charge.
#[derive(Debug, Clone)]
pub struct ChargeReceipt {
    /// Processor-side transaction identifier.
    pub transaction_id: String,
}

/// A payment processor the checkout flow can charge against.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opaque token the client SDK needs before collecting payment details.
    async fn client_token(&self) -> Result<String, CoreError>;

    /// Charge `amount` against a tokenized payment method.
    ///
    /// A processor decline or transport failure surfaces as
    /// [`CoreError::Dependency`]; the caller must not mutate any state in
    /// that case.
    async fn charge(&self, method_token: &str, amount: f64) -> Result<ChargeReceipt, CoreError>;
}

/// Method token the sandbox always declines, for exercising the failure path.
pub const SANDBOX_DECLINED_TOKEN: &str = "fake-processor-declined";

/// Development gateway: approves every well-formed charge.
pub struct SandboxGateway;

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn client_token(&self) -> Result<String, CoreError> {
        Ok(format!("sandbox-client-token-{}", Uuid::new_v4()))
    }

    async fn charge(&self, method_token: &str, amount: f64) -> Result<ChargeReceipt, CoreError> {
        if method_token.is_empty() {
            return Err(CoreError::Dependency(
                "Payment gateway rejected the charge: missing payment method token".into(),
            ));
        }
        if method_token == SANDBOX_DECLINED_TOKEN {
            return Err(CoreError::Dependency(
                "Payment gateway declined the charge".into(),
            ));
        }
        validate_amount(amount)
            .map_err(|e| CoreError::Dependency(format!("Payment gateway rejected the charge: {e}")))?;

        Ok(ChargeReceipt {
            transaction_id: format!("sandbox-{}", Uuid::new_v4()),
        })
    }
}
