use std::collections::BTreeMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set, TransactionTrait};

use crate::{
    audit::Actor,
    dto::payments::{CreateGatewayRequest, UpdateGatewayRequest},
    entity::gateway_params::Model as GatewayParamModel,
    entity::gateways::{
        ActiveModel, CREDIT_CARD_INDEX, Entity as Gateways, GatewayName, Model as GatewayModel,
        credit_card_conflict,
    },
    error::{AppError, AppResult, constraint_name, is_unique_violation, violation_message},
    state::AppState,
    validation,
};

pub async fn create_gateway(
    state: &AppState,
    actor: &Actor,
    payload: CreateGatewayRequest,
) -> AppResult<GatewayModel> {
    validation::required("account", &payload.account, 100)?;

    let name = payload.name;
    let active = ActiveModel {
        name: Set(name),
        account: Set(payload.account),
        is_active: Set(payload.is_active),
        is_sandbox: Set(payload.is_sandbox),
        accept_credit_card: Set(payload.accept_credit_card),
        accept_account: Set(payload.accept_account),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    };

    let result = save_checked(state, active, true).await;
    let gateway = explain_rejection(state, name, result).await?;

    tracing::info!(
        gateway = gateway.name.code(),
        accept_credit_card = gateway.accept_credit_card,
        "gateway created"
    );
    Ok(gateway)
}

pub async fn update_gateway(
    state: &AppState,
    actor: &Actor,
    name: GatewayName,
    payload: UpdateGatewayRequest,
) -> AppResult<GatewayModel> {
    let existing = get_gateway(state, name).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(account) = payload.account {
        validation::required("account", &account, 100)?;
        active.account = Set(account);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_sandbox) = payload.is_sandbox {
        active.is_sandbox = Set(is_sandbox);
    }
    if let Some(accept_credit_card) = payload.accept_credit_card {
        active.accept_credit_card = Set(accept_credit_card);
    }
    if let Some(accept_account) = payload.accept_account {
        active.accept_account = Set(accept_account);
    }
    active.modified_by = Set(actor.id());

    let result = save_checked(state, active, false).await;
    let gateway = explain_rejection(state, name, result).await?;

    tracing::info!(
        gateway = gateway.name.code(),
        accept_credit_card = gateway.accept_credit_card,
        "gateway updated"
    );
    Ok(gateway)
}

pub async fn get_gateway(state: &AppState, name: GatewayName) -> AppResult<GatewayModel> {
    Gateways::find_by_id(name)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn list_active_gateways(state: &AppState) -> AppResult<Vec<GatewayModel>> {
    Ok(Gateways::active_gateways(&state.orm).await?)
}

pub async fn delete_gateway(state: &AppState, name: GatewayName) -> AppResult<()> {
    let result = Gateways::delete_by_id(name).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(gateway = name.code(), "gateway deleted");
    Ok(())
}

pub async fn add_gateway_param(
    state: &AppState,
    actor: &Actor,
    gateway: GatewayName,
    name: &str,
    value: &str,
) -> AppResult<GatewayParamModel> {
    let gateway = get_gateway(state, gateway).await?;
    gateway.add_param(&state.orm, name, value, actor).await
}

pub async fn gateway_settings(
    state: &AppState,
    gateway: GatewayName,
) -> AppResult<BTreeMap<String, String>> {
    let gateway = get_gateway(state, gateway).await?;
    gateway.params(&state.orm).await
}

/// Validates and writes inside one transaction. The transaction is gone by the
/// time this returns, so callers may query the pool again.
async fn save_checked(
    state: &AppState,
    active: ActiveModel,
    insert: bool,
) -> AppResult<GatewayModel> {
    let txn = state.orm.begin().await?;
    active.clean(&txn).await?;
    let gateway = if insert {
        active.insert(&txn).await?
    } else {
        active.update(&txn).await?
    };
    txn.commit().await?;
    Ok(gateway)
}

/// Turns a lost race on the credit card index into the same validation error
/// the pre-check produces.
async fn explain_rejection(
    state: &AppState,
    name: GatewayName,
    result: AppResult<GatewayModel>,
) -> AppResult<GatewayModel> {
    match result {
        Err(AppError::OrmError(err)) if violates_credit_card_index(&err) => {
            tracing::warn!(gateway = name.code(), "credit card index rejected gateway write");
            let existing = Gateways::credit_card_gateway(&state.orm, Some(name)).await?;
            Err(match existing {
                Some(gateway) => credit_card_conflict(&gateway),
                None => AppError::validation(
                    "Another gateway is already configured to accept credit card payments.",
                ),
            })
        }
        Err(AppError::Validation(message)) => {
            tracing::warn!(gateway = name.code(), %message, "gateway write rejected");
            Err(AppError::Validation(message))
        }
        other => other,
    }
}

fn violates_credit_card_index(err: &DbErr) -> bool {
    if !is_unique_violation(err) {
        return false;
    }
    if constraint_name(err).is_some_and(|name| name == CREDIT_CARD_INDEX) {
        return true;
    }
    violation_message(err).is_some_and(|message| {
        message.contains(CREDIT_CARD_INDEX)
            || message.contains("payments_gateway.accept_credit_card")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        db::{create_orm_conn, run_migrations},
    };

    async fn memory_state() -> AppState {
        let config = AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            sqlx_logging: false,
        };
        let orm = create_orm_conn(&config).await.unwrap();
        run_migrations(&orm).await.unwrap();
        AppState { orm }
    }

    fn row(name: GatewayName, accept_credit_card: bool) -> ActiveModel {
        ActiveModel {
            name: Set(name),
            account: Set(format!("{}-account", name.code())),
            is_active: Set(true),
            is_sandbox: Set(false),
            accept_credit_card: Set(accept_credit_card),
            accept_account: Set(false),
            created_on: NotSet,
            modified_on: NotSet,
            created_by: Set(None),
            modified_by: Set(None),
        }
    }

    #[tokio::test]
    async fn index_violation_becomes_the_credit_card_error() {
        let state = memory_state().await;
        row(GatewayName::Stripe, true).insert(&state.orm).await.unwrap();

        let err = row(GatewayName::PayPal, true)
            .insert(&state.orm)
            .await
            .unwrap_err();
        assert!(violates_credit_card_index(&err));

        let mapped = explain_rejection(&state, GatewayName::PayPal, Err(err.into())).await;
        match mapped {
            Err(AppError::Validation(message)) => assert!(message.contains("ST"), "{message}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_unique_violations_pass_through() {
        let state = memory_state().await;
        row(GatewayName::Stripe, false).insert(&state.orm).await.unwrap();

        let err = row(GatewayName::Stripe, false)
            .insert(&state.orm)
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(!violates_credit_card_index(&err));

        let mapped = explain_rejection(&state, GatewayName::Stripe, Err(err.into())).await;
        assert!(matches!(mapped, Err(AppError::OrmError(_))));
    }

    #[test]
    fn non_constraint_errors_are_not_index_violations() {
        assert!(!violates_credit_card_index(&DbErr::Custom(
            "payments_gateway.accept_credit_card".into()
        )));
    }
}
