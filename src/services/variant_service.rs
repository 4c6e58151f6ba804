use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::Actor,
    dto::catalog::{CreateAttributeRequest, CreateVariantRequest},
    entity::{
        attributes::{self, Entity as Attributes},
        products::{self, Entity as Products},
        variant_products::{self, Entity as VariantProducts},
        variants::{ActiveModel, Column, Entity as Variants, Model as VariantModel},
    },
    error::{AppError, AppResult},
    state::AppState,
    validation,
};

/// Creates a variant and links it to `product_ids` in one transaction.
pub async fn create_variant(
    state: &AppState,
    actor: &Actor,
    payload: CreateVariantRequest,
) -> AppResult<VariantModel> {
    validation::required("default_value", &payload.default_value, 100)?;

    let mut product_ids = payload.product_ids;
    product_ids.sort();
    product_ids.dedup();

    let txn = state.orm.begin().await?;
    if !product_ids.is_empty() {
        let found = Products::find()
            .filter(products::Column::Id.is_in(product_ids.clone()))
            .count(&txn)
            .await?;
        if found != product_ids.len() as u64 {
            return Err(AppError::validation("variant refers to an unknown product"));
        }
    }

    let variant = ActiveModel {
        id: Set(Uuid::now_v7()),
        has_variant: Set(payload.has_variant),
        default_value: Set(payload.default_value),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&txn)
    .await?;

    for product_id in &product_ids {
        insert_link(&txn, variant.id, *product_id).await?;
    }
    txn.commit().await?;

    tracing::info!(variant_id = %variant.id, products = product_ids.len(), "variant created");
    Ok(variant)
}

pub async fn get_variant(state: &AppState, id: Uuid) -> AppResult<VariantModel> {
    Variants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

/// Links an existing variant to a product. Linking twice is a no-op.
pub async fn link_product(state: &AppState, variant_id: Uuid, product_id: Uuid) -> AppResult<()> {
    let variant = get_variant(state, variant_id).await?;
    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let existing = VariantProducts::find_by_id((variant.id, product.id))
        .one(&state.orm)
        .await?;
    if existing.is_none() {
        insert_link(&state.orm, variant.id, product.id).await?;
        tracing::info!(variant_id = %variant.id, product_id = %product.id, "variant linked");
    }
    Ok(())
}

pub async fn unlink_product(
    state: &AppState,
    variant_id: Uuid,
    product_id: Uuid,
) -> AppResult<()> {
    let result = VariantProducts::delete_by_id((variant_id, product_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(variant_id = %variant_id, product_id = %product_id, "variant unlinked");
    Ok(())
}

pub async fn variants_for_product(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<Vec<VariantModel>> {
    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let variants = product
        .find_related(Variants)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?;
    Ok(variants)
}

pub async fn products_for_variant(
    state: &AppState,
    variant_id: Uuid,
) -> AppResult<Vec<products::Model>> {
    let variant = get_variant(state, variant_id).await?;
    let products = variant
        .find_related(Products)
        .order_by_asc(products::Column::Name)
        .all(&state.orm)
        .await?;
    Ok(products)
}

pub async fn add_attribute(
    state: &AppState,
    actor: &Actor,
    variant_id: Uuid,
    payload: CreateAttributeRequest,
) -> AppResult<attributes::Model> {
    validation::required("option_name", &payload.option_name, 100)?;
    validation::required("default_value", &payload.default_value, 100)?;
    let variant = get_variant(state, variant_id).await?;

    let attribute = attributes::ActiveModel {
        id: Set(Uuid::now_v7()),
        variant_id: Set(variant.id),
        option_name: Set(payload.option_name),
        default_value: Set(payload.default_value),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(variant_id = %variant.id, attribute_id = %attribute.id, "attribute added");
    Ok(attribute)
}

pub async fn list_attributes(
    state: &AppState,
    variant_id: Uuid,
) -> AppResult<Vec<attributes::Model>> {
    let attributes = Attributes::find()
        .filter(attributes::Column::VariantId.eq(variant_id))
        .order_by_asc(attributes::Column::Id)
        .all(&state.orm)
        .await?;
    Ok(attributes)
}

async fn insert_link<C>(db: &C, variant_id: Uuid, product_id: Uuid) -> AppResult<()>
where
    C: ConnectionTrait,
{
    variant_products::ActiveModel {
        variant_id: Set(variant_id),
        product_id: Set(product_id),
    }
    .insert(db)
    .await?;
    Ok(())
}
