use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::gateways::GatewayName;

/// One named setting of a gateway (API key, webhook secret, ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments_gateway_param")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gateway_name: GatewayName,
    pub name: String,
    pub value: String,
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
        on_delete = "Cascade"
    )]
    Gateway,
}

impl Related<super::gateways::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gateway.def()
    }
}

crate::audit::impl_audited_behavior!();

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
