mod common;

use commerce_models::{
    dto::{catalog::CreateManufacturerRequest, payments::CreateCardIssuerRequest},
    error::AppError,
    services::{card_issuer_service, manufacturer_service},
};

fn issuer(descriptor: &str, name: &str, is_active: bool) -> CreateCardIssuerRequest {
    CreateCardIssuerRequest {
        descriptor: descriptor.into(),
        name: name.into(),
        is_active,
    }
}

#[tokio::test]
async fn descriptor_is_unique() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    card_issuer_service::create_card_issuer(&state, &actor, issuer("VISA", "Visa", true)).await?;

    let err = card_issuer_service::create_card_issuer(&state, &actor, issuer("VISA", "Visa 2", true))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    let visa = card_issuer_service::get_card_issuer(&state, "VISA").await?;
    assert_eq!(visa.name, "Visa");
    Ok(())
}

#[tokio::test]
async fn active_listing_skips_inactive_issuers() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    card_issuer_service::create_card_issuer(&state, &actor, issuer("VISA", "Visa", true)).await?;
    card_issuer_service::create_card_issuer(&state, &actor, issuer("MC", "MasterCard", true))
        .await?;
    card_issuer_service::create_card_issuer(&state, &actor, issuer("AMEX", "American Express", false))
        .await?;

    let active = card_issuer_service::list_active_card_issuers(&state).await?;
    let descriptors: Vec<_> = active.iter().map(|i| i.descriptor.as_str()).collect();
    assert_eq!(descriptors, ["MC", "VISA"]);
    Ok(())
}

#[tokio::test]
async fn toggling_the_flag_bumps_modified_on() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let creator = common::actor();
    let editor = common::actor();
    let amex = card_issuer_service::create_card_issuer(
        &state,
        &creator,
        issuer("AMEX", "American Express", false),
    )
    .await?;

    let enabled = card_issuer_service::set_card_issuer_active(&state, &editor, "AMEX", true).await?;
    assert!(enabled.is_active);
    assert!(enabled.modified_on > amex.modified_on);
    assert_eq!(enabled.created_on, amex.created_on);
    assert_eq!(enabled.modified_by, editor.id());

    let active = card_issuer_service::list_active_card_issuers(&state).await?;
    assert_eq!(active.len(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_descriptor_is_not_found() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    assert!(matches!(
        card_issuer_service::get_card_issuer(&state, "DISC").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        card_issuer_service::set_card_issuer_active(&state, &actor, "DISC", true).await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn manufacturer_name_is_unique() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let actor = common::actor();
    let ferris = |description: Option<&str>| CreateManufacturerRequest {
        name: "Ferris Works".into(),
        description: description.map(str::to_owned),
        is_active: true,
    };

    manufacturer_service::create_manufacturer(&state, &actor, ferris(None)).await?;
    let err = manufacturer_service::create_manufacturer(&state, &actor, ferris(Some("again")))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
    assert_eq!(manufacturer_service::list_manufacturers(&state, false).await?.len(), 1);
    Ok(())
}
