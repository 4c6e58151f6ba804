use serde::Deserialize;
use uuid::Uuid;

use crate::entity::{gateways::GatewayName, transactions::TransactionStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardIssuerRequest {
    pub descriptor: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGatewayRequest {
    pub name: GatewayName,
    pub account: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_sandbox: bool,
    #[serde(default)]
    pub accept_credit_card: bool,
    #[serde(default)]
    pub accept_account: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGatewayRequest {
    pub account: Option<String>,
    pub is_active: Option<bool>,
    pub is_sandbox: Option<bool>,
    pub accept_credit_card: Option<bool>,
    pub accept_account: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub gateway: GatewayName,
    pub order_id: Uuid,
    pub description: String,
    pub currency: String,
    /// Minor currency units.
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    pub status: Option<TransactionStatus>,
    pub description: Option<String>,
    pub error_message: Option<String>,
    pub refund_amount: Option<i64>,
}
