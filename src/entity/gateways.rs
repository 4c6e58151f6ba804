use std::collections::BTreeMap;
use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{
    audit::Actor,
    error::{AppError, AppResult},
    validation,
};

/// Supported payment processors. The stored value is the short code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum GatewayName {
    #[sea_orm(string_value = "PP")]
    #[serde(rename = "PP")]
    PayPal,
    #[sea_orm(string_value = "ST")]
    #[serde(rename = "ST")]
    Stripe,
    #[sea_orm(string_value = "AP")]
    #[serde(rename = "AP")]
    AmazonPayments,
}

impl GatewayName {
    pub fn code(&self) -> &'static str {
        match self {
            GatewayName::PayPal => "PP",
            GatewayName::Stripe => "ST",
            GatewayName::AmazonPayments => "AP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GatewayName::PayPal => "PayPal",
            GatewayName::Stripe => "Stripe",
            GatewayName::AmazonPayments => "Amazon Payments",
        }
    }
}

impl fmt::Display for GatewayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment processing gateway configuration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments_gateway")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: GatewayName,
    /// Account name at the gateway, for reference.
    pub account: String,
    /// Customers may pay through this gateway.
    pub is_active: bool,
    /// Sandbox mode for testing and debugging.
    pub is_sandbox: bool,
    /// Processes credit card payments. At most one gateway may set this.
    pub accept_credit_card: bool,
    /// Processes payments from the customer's own account at the gateway.
    pub accept_account: bool,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gateway_params::Entity")]
    Params,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::gateway_params::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Params.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

crate::audit::impl_audited_behavior!();

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.name, self.account)
    }
}

/// Name of the partial unique index backing the credit card rule.
pub const CREDIT_CARD_INDEX: &str = "uq_payments_gateway_credit_card";

impl Entity {
    /// Gateways customers can currently pay through.
    pub async fn active_gateways<C>(db: &C) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    /// The gateway accepting credit cards, ignoring `excluding`.
    pub async fn credit_card_gateway<C>(
        db: &C,
        excluding: Option<GatewayName>,
    ) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut finder = Entity::find().filter(Column::AcceptCreditCard.eq(true));
        if let Some(name) = excluding {
            finder = finder.filter(Column::Name.ne(name));
        }
        finder.order_by_asc(Column::Name).one(db).await
    }
}

pub fn credit_card_conflict(existing: &Model) -> AppError {
    AppError::validation(format!(
        "Gateway {} ({}) is already configured to accept credit card payments.",
        existing.name.code(),
        existing
    ))
}

impl ActiveModel {
    /// Rejects the write when it would leave two gateways accepting credit cards.
    pub async fn clean<C>(&self, db: &C) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        let accepts = match &self.accept_credit_card {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
            ActiveValue::NotSet => false,
        };
        if !accepts {
            return Ok(());
        }
        let name = match &self.name {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(*v),
            ActiveValue::NotSet => None,
        };
        match Entity::credit_card_gateway(db, name).await? {
            Some(existing) => Err(credit_card_conflict(&existing)),
            None => Ok(()),
        }
    }
}

impl Model {
    pub async fn add_param<C>(
        &self,
        db: &C,
        name: &str,
        value: &str,
        actor: &Actor,
    ) -> AppResult<super::gateway_params::Model>
    where
        C: ConnectionTrait,
    {
        validation::required("name", name, 250)?;
        validation::max_len("value", value, 500)?;
        let param = super::gateway_params::ActiveModel {
            id: Set(Uuid::now_v7()),
            gateway_name: Set(self.name),
            name: Set(name.to_owned()),
            value: Set(value.to_owned()),
            created_on: NotSet,
            modified_on: NotSet,
            created_by: Set(actor.id()),
            modified_by: Set(actor.id()),
        }
        .insert(db)
        .await?;
        tracing::debug!(gateway = self.name.code(), param = %param.name, "gateway param added");
        Ok(param)
    }

    pub async fn get_param<C>(&self, db: &C, name: &str) -> AppResult<String>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::gateway_params::Entity)
            .filter(super::gateway_params::Column::Name.eq(name))
            .one(db)
            .await?
            .map(|param| param.value)
            .ok_or(AppError::NotFound)
    }

    /// All settings of this gateway keyed by parameter name.
    pub async fn params<C>(&self, db: &C) -> AppResult<BTreeMap<String, String>>
    where
        C: ConnectionTrait,
    {
        let params = self
            .find_related(super::gateway_params::Entity)
            .all(db)
            .await?;
        Ok(params.into_iter().map(|p| (p.name, p.value)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_labels() {
        assert_eq!(GatewayName::Stripe.code(), "ST");
        assert_eq!(GatewayName::AmazonPayments.to_string(), "Amazon Payments");
        assert_eq!(GatewayName::PayPal.to_value(), "PP".to_string());
    }

    #[test]
    fn serde_uses_codes() {
        let name: GatewayName = serde_json::from_str("\"ST\"").unwrap();
        assert_eq!(name, GatewayName::Stripe);
        assert_eq!(serde_json::to_string(&GatewayName::PayPal).unwrap(), "\"PP\"");
    }
}
