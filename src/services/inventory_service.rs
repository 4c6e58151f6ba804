use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::Actor,
    dto::catalog::{CreateInventoryRequest, InventoryWithStock, UpdateReorderRequest},
    entity::{
        inventories::{self, Entity as Inventories},
        products::Entity as Products,
        stock_controls::{self, Entity as StockControls},
    },
    error::{AppError, AppResult},
    state::AppState,
    validation,
};

/// Creates an inventory record together with its stock control.
pub async fn create_inventory(
    state: &AppState,
    actor: &Actor,
    product_id: Uuid,
    payload: CreateInventoryRequest,
) -> AppResult<InventoryWithStock> {
    validation::required("sku", &payload.sku, 100)?;
    validation::non_negative("current_stock", payload.current_stock.into())?;
    validation::non_negative("reorder_point", payload.reorder_point.into())?;
    validation::non_negative("reorder_amount", payload.reorder_amount.into())?;

    let txn = state.orm.begin().await?;
    let product = Products::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let inventory = inventories::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_id: Set(product.id),
        sku: Set(payload.sku),
        stock_type: Set(payload.stock_type),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&txn)
    .await?;

    let stock = stock_controls::ActiveModel {
        id: Set(Uuid::now_v7()),
        inventory_id: Set(inventory.id),
        current_stock: Set(payload.current_stock),
        reorder_point: Set(payload.reorder_point),
        reorder_amount: Set(payload.reorder_amount),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        inventory_id = %inventory.id,
        sku = %inventory.sku,
        current_stock = stock.current_stock,
        "inventory created"
    );
    Ok(InventoryWithStock {
        inventory,
        stock: Some(stock),
    })
}

pub async fn get_inventory(state: &AppState, id: Uuid) -> AppResult<InventoryWithStock> {
    let (inventory, stock) = Inventories::find_by_id(id)
        .find_also_related(StockControls)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(InventoryWithStock { inventory, stock })
}

pub async fn inventory_for_product(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<Vec<InventoryWithStock>> {
    let rows = Inventories::find()
        .filter(inventories::Column::ProductId.eq(product_id))
        .order_by_asc(inventories::Column::Sku)
        .find_also_related(StockControls)
        .all(&state.orm)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(inventory, stock)| InventoryWithStock { inventory, stock })
        .collect())
}

/// Moves stock by `delta` under a row lock. Fails without writing when the
/// result would go below zero.
pub async fn adjust_stock(
    state: &AppState,
    actor: &Actor,
    inventory_id: Uuid,
    delta: i32,
) -> AppResult<stock_controls::Model> {
    if delta == 0 {
        return Err(AppError::validation("delta must not be 0"));
    }

    let txn = state.orm.begin().await?;
    let stock = StockControls::find()
        .filter(stock_controls::Column::InventoryId.eq(inventory_id))
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let new_stock = match stock.current_stock.checked_add(delta) {
        Some(n) if n >= 0 => n,
        _ => {
            tracing::warn!(
                inventory_id = %inventory_id,
                current_stock = stock.current_stock,
                delta,
                "stock adjustment rejected"
            );
            return Err(AppError::validation("stock cannot be negative"));
        }
    };

    let mut active: stock_controls::ActiveModel = stock.into();
    active.current_stock = Set(new_stock);
    active.modified_by = Set(actor.id());
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(inventory_id = %inventory_id, delta, current_stock = updated.current_stock, "stock adjusted");
    Ok(updated)
}

pub async fn update_reorder(
    state: &AppState,
    actor: &Actor,
    inventory_id: Uuid,
    payload: UpdateReorderRequest,
) -> AppResult<stock_controls::Model> {
    let stock = StockControls::find()
        .filter(stock_controls::Column::InventoryId.eq(inventory_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: stock_controls::ActiveModel = stock.into();
    if let Some(point) = payload.reorder_point {
        validation::non_negative("reorder_point", point.into())?;
        active.reorder_point = Set(point);
    }
    if let Some(amount) = payload.reorder_amount {
        validation::non_negative("reorder_amount", amount.into())?;
        active.reorder_amount = Set(amount);
    }
    active.modified_by = Set(actor.id());

    let updated = active.update(&state.orm).await?;
    tracing::info!(inventory_id = %inventory_id, reorder_point = updated.reorder_point, "reorder settings updated");
    Ok(updated)
}

/// Every inventory whose stock sits at or below its reorder point, lowest
/// stock first.
pub async fn list_reorder_candidates(state: &AppState) -> AppResult<Vec<InventoryWithStock>> {
    let rows = StockControls::find()
        .filter(
            Expr::col((StockControls, stock_controls::Column::CurrentStock))
                .lte(Expr::col((StockControls, stock_controls::Column::ReorderPoint))),
        )
        .order_by_asc(stock_controls::Column::CurrentStock)
        .order_by_asc(stock_controls::Column::Id)
        .find_also_related(Inventories)
        .all(&state.orm)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(stock, inventory)| {
            inventory.map(|inventory| InventoryWithStock {
                inventory,
                stock: Some(stock),
            })
        })
        .collect())
}
