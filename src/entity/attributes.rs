use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One possible value of a variant, e.g. "XL" for a size variant.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_attribute")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub variant_id: Uuid,
    pub option_name: String,
    pub default_value: String,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::variants::Entity",
        from = "Column::VariantId",
        to = "super::variants::Column::Id",
        on_delete = "Cascade"
    )]
    Variant,
}

impl Related<super::variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variant.def()
    }
}

crate::audit::impl_audited_behavior!();
