use std::collections::BTreeMap;

use commerce_models::{
    audit::Actor,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        catalog::{
            CreateCategoryRequest, CreateInventoryRequest, CreateManufacturerRequest,
            CreatePriceRequest, CreateProductRequest, CreateProductSpecRequest,
        },
        payments::{CreateCardIssuerRequest, CreateGatewayRequest},
    },
    error::{AppError, AppResult},
    services::{
        card_issuer_service, category_service, gateway_service, inventory_service,
        manufacturer_service, product_service,
    },
    state::AppState,
};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const FIXTURE: &str = include_str!("../../fixtures/seed.json");

#[derive(Debug, Deserialize)]
struct Fixture {
    actor: Uuid,
    #[serde(default)]
    card_issuers: Vec<CreateCardIssuerRequest>,
    #[serde(default)]
    gateways: Vec<GatewaySeed>,
    #[serde(default)]
    manufacturers: Vec<CreateManufacturerRequest>,
    /// Parents must come before their children.
    #[serde(default)]
    categories: Vec<CategorySeed>,
    #[serde(default)]
    products: Vec<ProductSeed>,
}

#[derive(Debug, Deserialize)]
struct GatewaySeed {
    #[serde(flatten)]
    gateway: CreateGatewayRequest,
    #[serde(default)]
    params: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CategorySeed {
    parent_slug: Option<String>,
    #[serde(flatten)]
    category: CreateCategoryRequest,
}

#[derive(Debug, Deserialize)]
struct ProductSeed {
    #[serde(flatten)]
    product: CreateProductRequest,
    #[serde(default)]
    prices: Vec<CreatePriceRequest>,
    #[serde(default)]
    inventory: Vec<CreateInventoryRequest>,
    #[serde(default)]
    specs: Vec<CreateProductSpecRequest>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,commerce_models=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let fixture: Fixture = serde_json::from_str(FIXTURE)?;

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config).await?;
    run_migrations(&orm).await?;
    let state = AppState { orm };
    let actor = Actor::new(fixture.actor);

    seed_card_issuers(&state, &actor, fixture.card_issuers).await?;
    seed_gateways(&state, &actor, fixture.gateways).await?;
    seed_manufacturers(&state, &actor, fixture.manufacturers).await?;
    seed_categories(&state, &actor, fixture.categories).await?;
    seed_products(&state, &actor, fixture.products).await?;

    tracing::info!("seed completed");
    Ok(())
}

/// `Ok(None)` for a missing row, so lookups can drive insert-if-absent.
fn found<T>(result: AppResult<T>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AppError::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

async fn seed_card_issuers(
    state: &AppState,
    actor: &Actor,
    issuers: Vec<CreateCardIssuerRequest>,
) -> anyhow::Result<()> {
    for issuer in issuers {
        let existing =
            found(card_issuer_service::get_card_issuer(state, &issuer.descriptor).await)?;
        if existing.is_none() {
            card_issuer_service::create_card_issuer(state, actor, issuer).await?;
        }
    }
    Ok(())
}

async fn seed_gateways(
    state: &AppState,
    actor: &Actor,
    gateways: Vec<GatewaySeed>,
) -> anyhow::Result<()> {
    for seed in gateways {
        let name = seed.gateway.name;
        if found(gateway_service::get_gateway(state, name).await)?.is_none() {
            gateway_service::create_gateway(state, actor, seed.gateway).await?;
        }

        let settings = gateway_service::gateway_settings(state, name).await?;
        for (key, value) in seed.params {
            if !settings.contains_key(&key) {
                gateway_service::add_gateway_param(state, actor, name, &key, &value).await?;
            }
        }
    }
    Ok(())
}

async fn seed_manufacturers(
    state: &AppState,
    actor: &Actor,
    manufacturers: Vec<CreateManufacturerRequest>,
) -> anyhow::Result<()> {
    let existing = manufacturer_service::list_manufacturers(state, false).await?;
    for manufacturer in manufacturers {
        if existing.iter().any(|m| m.name == manufacturer.name) {
            continue;
        }
        manufacturer_service::create_manufacturer(state, actor, manufacturer).await?;
    }
    Ok(())
}

async fn seed_categories(
    state: &AppState,
    actor: &Actor,
    categories: Vec<CategorySeed>,
) -> anyhow::Result<()> {
    for seed in categories {
        if found(category_service::find_by_slug(state, &seed.category.slug).await)?.is_some() {
            continue;
        }
        let mut category = seed.category;
        if let Some(parent_slug) = seed.parent_slug {
            let parent = category_service::find_by_slug(state, &parent_slug).await?;
            category.parent_id = Some(parent.id);
        }
        category_service::create_category(state, actor, category).await?;
    }
    Ok(())
}

async fn seed_products(
    state: &AppState,
    actor: &Actor,
    products: Vec<ProductSeed>,
) -> anyhow::Result<()> {
    for seed in products {
        if found(product_service::find_by_handle(state, &seed.product.handle).await)?.is_some() {
            continue;
        }
        let product = product_service::create_product(state, actor, seed.product).await?;
        for price in seed.prices {
            product_service::add_price(state, actor, product.id, price).await?;
        }
        for inventory in seed.inventory {
            inventory_service::create_inventory(state, actor, product.id, inventory).await?;
        }
        for spec in seed.specs {
            product_service::add_spec(state, actor, product.id, spec).await?;
        }
    }
    Ok(())
}
