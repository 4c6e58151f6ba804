use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    /// URL handle.
    #[sea_orm(unique)]
    pub handle: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub sales_account_code: String,
    pub supplier_code: String,
    pub purchase_account_code: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::prices::Entity")]
    Prices,
    #[sea_orm(has_many = "super::inventories::Entity")]
    Inventories,
    #[sea_orm(has_many = "super::product_specs::Entity")]
    Specs,
    #[sea_orm(has_many = "super::product_pics::Entity")]
    Pics,
}

impl Related<super::prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prices.def()
    }
}

impl Related<super::inventories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventories.def()
    }
}

impl Related<super::product_specs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Specs.def()
    }
}

impl Related<super::product_pics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pics.def()
    }
}

impl Related<super::variants::Entity> for Entity {
    fn to() -> RelationDef {
        super::variant_products::Relation::Variant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::variant_products::Relation::Product.def().rev())
    }
}

crate::audit::impl_audited_behavior!();

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
