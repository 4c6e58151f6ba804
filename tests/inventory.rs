mod common;

use commerce_models::{
    dto::catalog::{
        CreateInventoryRequest, CreateProductRequest, InventoryWithStock, UpdateReorderRequest,
    },
    entity::inventories::StockType,
    error::AppError,
    services::{inventory_service, product_service},
    state::AppState,
};
use uuid::Uuid;

async fn stocked(
    state: &AppState,
    sku: &str,
    current_stock: i32,
    reorder_point: i32,
) -> anyhow::Result<InventoryWithStock> {
    let actor = common::actor();
    let handle = format!("{}-{}", sku.to_lowercase(), Uuid::now_v7());
    let product = product_service::create_product(
        state,
        &actor,
        CreateProductRequest {
            name: handle.clone(),
            handle,
            description: None,
            tags: None,
            sales_account_code: "4000".into(),
            supplier_code: "SUP".into(),
            purchase_account_code: "5000".into(),
            display_order: 0,
            is_active: true,
        },
    )
    .await?;
    let inventory = inventory_service::create_inventory(
        state,
        &actor,
        product.id,
        CreateInventoryRequest {
            sku: sku.into(),
            stock_type: StockType::Standard,
            current_stock,
            reorder_point,
            reorder_amount: 25,
        },
    )
    .await?;
    Ok(inventory)
}

#[tokio::test]
async fn stock_moves_by_delta() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    let item = stocked(&state, "SKU-1", 10, 2).await?;
    let id = item.inventory.id;

    let stock = inventory_service::adjust_stock(&state, &actor, id, -4).await?;
    assert_eq!(stock.current_stock, 6);
    let stock = inventory_service::adjust_stock(&state, &actor, id, 15).await?;
    assert_eq!(stock.current_stock, 21);

    let err = inventory_service::adjust_stock(&state, &actor, id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn stock_never_goes_negative() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    let item = stocked(&state, "SKU-1", 3, 0).await?;
    let id = item.inventory.id;

    let err = inventory_service::adjust_stock(&state, &actor, id, -4)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let reloaded = inventory_service::get_inventory(&state, id).await?;
    assert_eq!(reloaded.stock.map(|s| s.current_stock), Some(3));

    let emptied = inventory_service::adjust_stock(&state, &actor, id, -3).await?;
    assert_eq!(emptied.current_stock, 0);
    Ok(())
}

#[tokio::test]
async fn reorder_candidates_are_at_or_below_their_point() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    let low = stocked(&state, "LOW", 1, 5).await?;
    let edge = stocked(&state, "EDGE", 5, 5).await?;
    let plenty = stocked(&state, "PLENTY", 50, 5).await?;

    let candidates = inventory_service::list_reorder_candidates(&state).await?;
    let skus: Vec<_> = candidates.iter().map(|c| c.inventory.sku.as_str()).collect();
    assert_eq!(skus, ["LOW", "EDGE"]);
    assert!(
        candidates
            .iter()
            .all(|c| c.stock.as_ref().is_some_and(|s| s.needs_reorder()))
    );

    inventory_service::update_reorder(
        &state,
        &actor,
        plenty.inventory.id,
        UpdateReorderRequest {
            reorder_point: Some(60),
            reorder_amount: None,
        },
    )
    .await?;
    inventory_service::adjust_stock(&state, &actor, low.inventory.id, 10).await?;

    let candidates = inventory_service::list_reorder_candidates(&state).await?;
    let ids: Vec<_> = candidates.iter().map(|c| c.inventory.id).collect();
    assert_eq!(ids, [edge.inventory.id, plenty.inventory.id]);
    Ok(())
}

#[tokio::test]
async fn sku_is_unique_and_missing_inventory_is_not_found() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    stocked(&state, "DUP", 1, 0).await?;
    let err = stocked(&state, "DUP", 1, 0).await.unwrap_err();
    let err = err.downcast::<AppError>()?;
    assert!(err.is_unique_violation());

    assert!(matches!(
        inventory_service::get_inventory(&state, Uuid::now_v7()).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        inventory_service::adjust_stock(&state, &common::actor(), Uuid::now_v7(), 1).await,
        Err(AppError::NotFound)
    ));
    Ok(())
}
