use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A product option axis (size, color, ...), shared by any number of products.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_variant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub has_variant: bool,
    pub default_value: String,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attributes::Entity")]
    Attributes,
}

impl Related<super::attributes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attributes.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::variant_products::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::variant_products::Relation::Variant.def().rev())
    }
}

crate::audit::impl_audited_behavior!();
