use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    audit::Actor,
    dto::payments::CreateCardIssuerRequest,
    entity::card_issuers::{ActiveModel, Column, Entity as CardIssuers, Model as CardIssuerModel},
    error::{AppError, AppResult},
    state::AppState,
    validation,
};

pub async fn create_card_issuer(
    state: &AppState,
    actor: &Actor,
    payload: CreateCardIssuerRequest,
) -> AppResult<CardIssuerModel> {
    validation::required("descriptor", &payload.descriptor, 100)?;
    validation::required("name", &payload.name, 100)?;

    let issuer = ActiveModel {
        descriptor: Set(payload.descriptor),
        name: Set(payload.name),
        is_active: Set(payload.is_active),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(descriptor = %issuer.descriptor, "card issuer created");
    Ok(issuer)
}

pub async fn get_card_issuer(state: &AppState, descriptor: &str) -> AppResult<CardIssuerModel> {
    CardIssuers::find_by_id(descriptor.to_owned())
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn list_active_card_issuers(state: &AppState) -> AppResult<Vec<CardIssuerModel>> {
    let issuers = CardIssuers::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?;
    Ok(issuers)
}

pub async fn set_card_issuer_active(
    state: &AppState,
    actor: &Actor,
    descriptor: &str,
    is_active: bool,
) -> AppResult<CardIssuerModel> {
    let existing = get_card_issuer(state, descriptor).await?;
    let mut active: ActiveModel = existing.into();
    active.is_active = Set(is_active);
    active.modified_by = Set(actor.id());
    let issuer = active.update(&state.orm).await?;

    tracing::info!(descriptor = %issuer.descriptor, is_active, "card issuer updated");
    Ok(issuer)
}
