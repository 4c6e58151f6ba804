use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product category. Categories form a tree through `parent_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    /// Stored image path, e.g. `images/catalog/categories/shoes.png`.
    pub pic: Option<String>,
    pub parent_id: Option<Uuid>,
    /// Comma-delimited SEO keywords for the meta tag.
    pub tags: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    /// Always shown expanded in navigation.
    pub is_expanded: bool,
    pub created_on: DateTimeWithTimeZone,
    pub modified_on: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
}

crate::audit::impl_audited_behavior!();

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
