use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::Actor,
    dto::payments::{CreateTransactionRequest, UpdateTransactionRequest},
    entity::transaction_params::Model as TransactionParamModel,
    entity::transactions::{
        ActiveModel, Column, Entity as Transactions, Model as TransactionModel, TransactionStatus,
    },
    error::{AppError, AppResult},
    state::AppState,
    validation,
};

pub async fn create_transaction(
    state: &AppState,
    actor: &Actor,
    payload: CreateTransactionRequest,
) -> AppResult<TransactionModel> {
    validation::required("description", &payload.description, 250)?;
    validation::currency_code(&payload.currency)?;
    validation::non_negative("amount", payload.amount)?;

    let transaction = ActiveModel {
        id: Set(Uuid::now_v7()),
        gateway_name: Set(payload.gateway),
        order_id: Set(payload.order_id),
        description: Set(payload.description),
        error_message: Set(String::new()),
        status: Set(TransactionStatus::Pending),
        currency: Set(payload.currency),
        amount: Set(payload.amount),
        refund_amount: Set(None),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        transaction_id = %transaction.id,
        order_id = %transaction.order_id,
        gateway = transaction.gateway_name.code(),
        amount = transaction.amount,
        "transaction created"
    );
    Ok(transaction)
}

pub async fn get_transaction(state: &AppState, id: Uuid) -> AppResult<TransactionModel> {
    Transactions::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

/// Every payment attempt for an order, oldest first.
pub async fn list_order_transactions(
    state: &AppState,
    order_id: Uuid,
) -> AppResult<Vec<TransactionModel>> {
    let transactions = Transactions::find()
        .filter(Column::OrderId.eq(order_id))
        .order_by_asc(Column::CreatedOn)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?;
    Ok(transactions)
}

pub async fn update_transaction(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    payload: UpdateTransactionRequest,
) -> AppResult<TransactionModel> {
    let existing = get_transaction(state, id).await?;
    if let Some(refund) = payload.refund_amount {
        validation::non_negative("refund_amount", refund)?;
        if refund > existing.amount {
            return Err(AppError::validation(format!(
                "refund_amount {refund} exceeds transaction amount {}",
                existing.amount
            )));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(description) = payload.description {
        validation::required("description", &description, 250)?;
        active.description = Set(description);
    }
    if let Some(error_message) = payload.error_message {
        validation::max_len("error_message", &error_message, 1000)?;
        active.error_message = Set(error_message);
    }
    if let Some(refund) = payload.refund_amount {
        active.refund_amount = Set(Some(refund));
    }
    active.modified_by = Set(actor.id());

    let transaction = active.update(&state.orm).await?;

    tracing::info!(
        transaction_id = %transaction.id,
        status = ?transaction.status,
        "transaction updated"
    );
    Ok(transaction)
}

pub async fn add_transaction_param(
    state: &AppState,
    actor: &Actor,
    transaction_id: Uuid,
    name: &str,
    value: &str,
) -> AppResult<TransactionParamModel> {
    let transaction = get_transaction(state, transaction_id).await?;
    transaction.add_param(&state.orm, name, value, actor).await
}

pub async fn get_transaction_param(
    state: &AppState,
    transaction_id: Uuid,
    name: &str,
) -> AppResult<String> {
    let transaction = get_transaction(state, transaction_id).await?;
    transaction.get_param(&state.orm, name).await
}
