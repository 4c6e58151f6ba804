use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::Actor,
    dto::catalog::{CreateManufacturerRequest, UpdateManufacturerRequest},
    entity::manufacturers::{
        ActiveModel, Column, Entity as Manufacturers, Model as ManufacturerModel,
    },
    error::{AppError, AppResult},
    state::AppState,
    validation,
};

pub async fn create_manufacturer(
    state: &AppState,
    actor: &Actor,
    payload: CreateManufacturerRequest,
) -> AppResult<ManufacturerModel> {
    validation::required("name", &payload.name, 100)?;

    let manufacturer = ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name),
        description: Set(payload.description),
        is_active: Set(payload.is_active),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(manufacturer_id = %manufacturer.id, name = %manufacturer.name, "manufacturer created");
    Ok(manufacturer)
}

pub async fn get_manufacturer(state: &AppState, id: Uuid) -> AppResult<ManufacturerModel> {
    Manufacturers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_manufacturer(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    payload: UpdateManufacturerRequest,
) -> AppResult<ManufacturerModel> {
    let existing = get_manufacturer(state, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        validation::required("name", &name, 100)?;
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.modified_by = Set(actor.id());

    let manufacturer = active.update(&state.orm).await?;
    tracing::info!(manufacturer_id = %manufacturer.id, "manufacturer updated");
    Ok(manufacturer)
}

/// Manufacturers ordered by name.
pub async fn list_manufacturers(
    state: &AppState,
    active_only: bool,
) -> AppResult<Vec<ManufacturerModel>> {
    let mut finder = Manufacturers::find();
    if active_only {
        finder = finder.filter(Column::IsActive.eq(true));
    }
    let manufacturers = finder.order_by_asc(Column::Name).all(&state.orm).await?;
    Ok(manufacturers)
}
