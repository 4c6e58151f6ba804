use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A credit card type accepted at checkout (Visa, Mastercard, ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments_card_issuer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub descriptor: String,
    pub name: String,
    pub is_active: bool,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

crate::audit::impl_audited_behavior!();

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
