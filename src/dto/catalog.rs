use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{
    categories,
    inventories::{self, StockType},
    prices, product_pics, product_specs, products, stock_controls, variants,
};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateManufacturerRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateManufacturerRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub pic: Option<String>,
    pub parent_id: Option<Uuid>,
    pub tags: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_expanded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub pic: Option<String>,
    pub tags: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_expanded: Option<bool>,
}

/// A category with its descendants, ordered by `(display_order, id)`.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub category: categories::Model,
    pub children: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub handle: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub sales_account_code: String,
    pub supplier_code: String,
    pub purchase_account_code: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub sales_account_code: Option<String>,
    pub supplier_code: Option<String>,
    pub purchase_account_code: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePriceRequest {
    pub supply_price: i64,
    pub retail_price: i64,
    #[serde(default)]
    pub markup: f64,
    pub tax_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVariantRequest {
    #[serde(default = "default_true")]
    pub has_variant: bool,
    pub default_value: String,
    #[serde(default)]
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttributeRequest {
    pub option_name: String,
    pub default_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventoryRequest {
    pub sku: String,
    pub stock_type: StockType,
    #[serde(default)]
    pub current_stock: i32,
    #[serde(default)]
    pub reorder_point: i32,
    #[serde(default)]
    pub reorder_amount: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReorderRequest {
    pub reorder_point: Option<i32>,
    pub reorder_amount: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductSpecRequest {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductPicRequest {
    pub pic: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryWithStock {
    pub inventory: inventories::Model,
    pub stock: Option<stock_controls::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product: products::Model,
    pub prices: Vec<prices::Model>,
    pub variants: Vec<variants::Model>,
    pub inventory: Vec<InventoryWithStock>,
    pub specs: Vec<product_specs::Model>,
    pub pics: Vec<product_pics::Model>,
}
