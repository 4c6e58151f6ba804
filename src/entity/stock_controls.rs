use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_stock_control")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub inventory_id: Uuid,
    pub current_stock: i32,
    /// Reorder once `current_stock` falls to this level.
    pub reorder_point: i32,
    pub reorder_amount: i32,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventories::Entity",
        from = "Column::InventoryId",
        to = "super::inventories::Column::Id",
        on_delete = "Cascade"
    )]
    Inventory,
}

impl Related<super::inventories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

crate::audit::impl_audited_behavior!();

impl Model {
    pub fn needs_reorder(&self) -> bool {
        self.current_stock <= self.reorder_point
    }
}
