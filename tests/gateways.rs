mod common;

use commerce_models::{
    dto::payments::{CreateGatewayRequest, UpdateGatewayRequest},
    entity::gateways::{self, GatewayName},
    error::AppError,
    services::gateway_service,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

fn gateway(name: GatewayName, accept_credit_card: bool) -> CreateGatewayRequest {
    CreateGatewayRequest {
        name,
        account: format!("{}-account", name.code()),
        is_active: true,
        is_sandbox: true,
        accept_credit_card,
        accept_account: false,
    }
}

#[tokio::test]
async fn only_one_gateway_accepts_credit_cards() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();

    gateway_service::create_gateway(&state, &actor, gateway(GatewayName::Stripe, true)).await?;

    let err = gateway_service::create_gateway(&state, &actor, gateway(GatewayName::PayPal, true))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(message) => assert!(message.contains("ST"), "{message}"),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(
        gateways::Entity::find_by_id(GatewayName::PayPal)
            .one(&state.orm)
            .await?
            .is_none()
    );

    // Without the flag it is fine, and so is re-saving the card gateway itself.
    gateway_service::create_gateway(&state, &actor, gateway(GatewayName::PayPal, false)).await?;
    gateway_service::update_gateway(
        &state,
        &actor,
        GatewayName::Stripe,
        UpdateGatewayRequest {
            account: Some("acct_live".into()),
            ..Default::default()
        },
    )
    .await?;

    let err = gateway_service::update_gateway(
        &state,
        &actor,
        GatewayName::PayPal,
        UpdateGatewayRequest {
            accept_credit_card: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Switching the card role over is allowed once Stripe lets go of it.
    gateway_service::update_gateway(
        &state,
        &actor,
        GatewayName::Stripe,
        UpdateGatewayRequest {
            accept_credit_card: Some(false),
            ..Default::default()
        },
    )
    .await?;
    let paypal = gateway_service::update_gateway(
        &state,
        &actor,
        GatewayName::PayPal,
        UpdateGatewayRequest {
            accept_credit_card: Some(true),
            ..Default::default()
        },
    )
    .await?;
    assert!(paypal.accept_credit_card);
    Ok(())
}

#[tokio::test]
async fn store_rejects_second_credit_card_gateway_without_the_check() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    gateway_service::create_gateway(&state, &actor, gateway(GatewayName::Stripe, true)).await?;

    let result = gateways::ActiveModel {
        name: Set(GatewayName::AmazonPayments),
        account: Set("amzn".into()),
        is_active: Set(true),
        is_sandbox: Set(false),
        accept_credit_card: Set(true),
        accept_account: Set(false),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await;

    let err = AppError::from(result.unwrap_err());
    assert!(err.is_unique_violation());
    Ok(())
}

#[tokio::test]
async fn gateway_params_are_unique_per_gateway() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    gateway_service::create_gateway(&state, &actor, gateway(GatewayName::Stripe, true)).await?;
    gateway_service::create_gateway(&state, &actor, gateway(GatewayName::PayPal, false)).await?;

    gateway_service::add_gateway_param(&state, &actor, GatewayName::Stripe, "api_key", "sk_1")
        .await?;
    gateway_service::add_gateway_param(&state, &actor, GatewayName::PayPal, "api_key", "pp_1")
        .await?;

    let err = gateway_service::add_gateway_param(
        &state,
        &actor,
        GatewayName::Stripe,
        "api_key",
        "sk_2",
    )
    .await
    .unwrap_err();
    assert!(err.is_unique_violation());

    let settings = gateway_service::gateway_settings(&state, GatewayName::Stripe).await?;
    assert_eq!(settings.get("api_key").map(String::as_str), Some("sk_1"));

    let stripe = gateway_service::get_gateway(&state, GatewayName::Stripe).await?;
    assert!(matches!(
        stripe.get_param(&state.orm, "missing").await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn active_gateways_skip_disabled_ones() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    gateway_service::create_gateway(&state, &actor, gateway(GatewayName::Stripe, true)).await?;
    let mut disabled = gateway(GatewayName::PayPal, false);
    disabled.is_active = false;
    gateway_service::create_gateway(&state, &actor, disabled).await?;

    let active = gateway_service::list_active_gateways(&state).await?;
    let names: Vec<_> = active.iter().map(|g| g.name).collect();
    assert_eq!(names, [GatewayName::Stripe]);
    assert_eq!(active[0].to_string(), "Stripe -- ST-account");
    Ok(())
}

#[tokio::test]
async fn missing_gateway_is_not_found() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    assert!(matches!(
        gateway_service::get_gateway(&state, GatewayName::AmazonPayments).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        gateway_service::delete_gateway(&state, GatewayName::AmazonPayments).await,
        Err(AppError::NotFound)
    ));
    Ok(())
}
