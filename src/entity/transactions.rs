use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::gateways::GatewayName;
use crate::{
    audit::Actor,
    error::{AppError, AppResult},
    validation,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "PE")]
    Pending,
    #[sea_orm(string_value = "PR")]
    Processing,
    #[sea_orm(string_value = "AP")]
    Approved,
    #[sea_orm(string_value = "FA")]
    Failed,
    #[sea_orm(string_value = "RE")]
    Refunded,
}

/// A single payment attempt against an order through a gateway.
///
/// Amounts are in minor currency units.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments_transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gateway_name: GatewayName,
    /// Order in the sales subsystem; not a foreign key here.
    pub order_id: Uuid,
    pub description: String,
    pub error_message: String,
    pub status: TransactionStatus,
    pub currency: String,
    pub amount: i64,
    pub refund_amount: Option<i64>,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gateways::Entity",
        from = "Column::GatewayName",
        to = "super::gateways::Column::Name",
        on_delete = "Restrict"
    )]
    Gateway,
    #[sea_orm(has_many = "super::transaction_params::Entity")]
    Params,
}

impl Related<super::gateways::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gateway.def()
    }
}

impl Related<super::transaction_params::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Params.def()
    }
}

crate::audit::impl_audited_behavior!();

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Model {
    /// Records a parameter returned by the gateway (auth code, charge id, ...).
    ///
    /// A second parameter with the same name is rejected by the store.
    pub async fn add_param<C>(
        &self,
        db: &C,
        name: &str,
        value: &str,
        actor: &Actor,
    ) -> AppResult<super::transaction_params::Model>
    where
        C: ConnectionTrait,
    {
        validation::required("name", name, 100)?;
        validation::max_len("value", value, 250)?;
        let param = super::transaction_params::ActiveModel {
            id: Set(Uuid::now_v7()),
            transaction_id: Set(self.id),
            name: Set(name.to_owned()),
            value: Set(value.to_owned()),
            created_on: NotSet,
            modified_on: NotSet,
            created_by: Set(actor.id()),
            modified_by: Set(actor.id()),
        }
        .insert(db)
        .await?;
        tracing::debug!(transaction_id = %self.id, param = %param.name, "transaction param added");
        Ok(param)
    }

    pub async fn get_param<C>(&self, db: &C, name: &str) -> AppResult<String>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::transaction_params::Entity)
            .filter(super::transaction_params::Column::Name.eq(name))
            .one(db)
            .await?
            .map(|param| param.value)
            .ok_or(AppError::NotFound)
    }
}
