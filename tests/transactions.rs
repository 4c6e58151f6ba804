mod common;

use commerce_models::{
    audit::Actor,
    dto::payments::{CreateGatewayRequest, CreateTransactionRequest, UpdateTransactionRequest},
    entity::{gateways::GatewayName, transactions::TransactionStatus},
    error::AppError,
    services::{gateway_service, transaction_service},
    state::AppState,
};
use uuid::Uuid;

async fn stripe(state: &AppState, actor: &Actor) -> anyhow::Result<()> {
    gateway_service::create_gateway(
        state,
        actor,
        CreateGatewayRequest {
            name: GatewayName::Stripe,
            account: "acct_1".into(),
            is_active: true,
            is_sandbox: true,
            accept_credit_card: true,
            accept_account: false,
        },
    )
    .await?;
    Ok(())
}

fn payment(order_id: Uuid, amount: i64) -> CreateTransactionRequest {
    CreateTransactionRequest {
        gateway: GatewayName::Stripe,
        order_id,
        description: "Order payment".into(),
        currency: "USD".into(),
        amount,
    }
}

#[tokio::test]
async fn transaction_params_round_trip_by_name() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    stripe(&state, &actor).await?;

    let txn = transaction_service::create_transaction(&state, &actor, payment(Uuid::now_v7(), 2500))
        .await?;
    assert_eq!(txn.status, TransactionStatus::Pending);
    assert_eq!(txn.error_message, "");
    assert_eq!(txn.refund_amount, None);

    transaction_service::add_transaction_param(&state, &actor, txn.id, "auth_code", "X123").await?;
    let value = transaction_service::get_transaction_param(&state, txn.id, "auth_code").await?;
    assert_eq!(value, "X123");

    assert!(matches!(
        transaction_service::get_transaction_param(&state, txn.id, "avs_result").await,
        Err(AppError::NotFound)
    ));

    let err = transaction_service::add_transaction_param(&state, &actor, txn.id, "auth_code", "Y")
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
    Ok(())
}

#[tokio::test]
async fn refunds_cannot_exceed_the_amount() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    stripe(&state, &actor).await?;
    let txn = transaction_service::create_transaction(&state, &actor, payment(Uuid::now_v7(), 1000))
        .await?;

    let err = transaction_service::update_transaction(
        &state,
        &actor,
        txn.id,
        UpdateTransactionRequest {
            refund_amount: Some(1001),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let refunded = transaction_service::update_transaction(
        &state,
        &actor,
        txn.id,
        UpdateTransactionRequest {
            status: Some(TransactionStatus::Refunded),
            refund_amount: Some(1000),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(refunded.status, TransactionStatus::Refunded);
    assert_eq!(refunded.refund_amount, Some(1000));
    Ok(())
}

#[tokio::test]
async fn currency_must_be_an_iso_code() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    stripe(&state, &actor).await?;

    let mut request = payment(Uuid::now_v7(), 100);
    request.currency = "usd".into();
    let err = transaction_service::create_transaction(&state, &actor, request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn order_transactions_are_listed_oldest_first() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    stripe(&state, &actor).await?;
    let order_id = Uuid::now_v7();

    let failed = transaction_service::create_transaction(&state, &actor, payment(order_id, 500))
        .await?;
    transaction_service::update_transaction(
        &state,
        &actor,
        failed.id,
        UpdateTransactionRequest {
            status: Some(TransactionStatus::Failed),
            error_message: Some("card declined".into()),
            ..Default::default()
        },
    )
    .await?;
    let retry = transaction_service::create_transaction(&state, &actor, payment(order_id, 500))
        .await?;
    transaction_service::create_transaction(&state, &actor, payment(Uuid::now_v7(), 900)).await?;

    let listed = transaction_service::list_order_transactions(&state, order_id).await?;
    let ids: Vec<_> = listed.iter().map(|t| t.id).collect();
    assert_eq!(ids, [failed.id, retry.id]);
    assert_eq!(listed[0].status, TransactionStatus::Failed);
    assert_eq!(listed[0].error_message, "card declined");
    Ok(())
}

#[tokio::test]
async fn gateway_with_transactions_cannot_be_deleted() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    stripe(&state, &actor).await?;
    transaction_service::create_transaction(&state, &actor, payment(Uuid::now_v7(), 100)).await?;

    let result = gateway_service::delete_gateway(&state, GatewayName::Stripe).await;
    assert!(matches!(result, Err(AppError::OrmError(_))));
    gateway_service::get_gateway(&state, GatewayName::Stripe).await?;
    Ok(())
}
