use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::Actor,
    dto::catalog::{
        CreatePriceRequest, CreateProductPicRequest, CreateProductRequest,
        CreateProductSpecRequest, InventoryWithStock, ProductDetail, UpdateProductRequest,
    },
    entity::{
        inventories::{self, Entity as Inventories},
        prices::{self, Entity as Prices},
        product_pics::{self, Entity as ProductPics},
        product_specs::{self, Entity as ProductSpecs},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        stock_controls::Entity as StockControls,
        variants::Entity as Variants,
    },
    error::{AppError, AppResult},
    params::{Page, ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
    validation,
};

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<Page<ProductModel>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(Column::Name.contains(search.as_str()))
                .add(Column::Handle.contains(search.as_str())),
        );
    }

    if query.active_only.unwrap_or(false) {
        condition = condition.add(Column::IsActive.eq(true));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::Id);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Asc);
    let sort_col = match sort_by {
        ProductSortBy::Id => Column::Id,
        ProductSortBy::Name => Column::Name,
        ProductSortBy::DisplayOrder => Column::DisplayOrder,
        ProductSortBy::CreatedOn => Column::CreatedOn,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };
    if !matches!(sort_by, ProductSortBy::Id) {
        finder = finder.order_by_asc(Column::Id);
    }

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .limit(limit)
        .offset(offset)
        .all(&state.orm)
        .await?;

    Ok(Page {
        items,
        page,
        per_page: limit,
        total,
    })
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn find_by_handle(state: &AppState, handle: &str) -> AppResult<ProductModel> {
    Products::find()
        .filter(Column::Handle.eq(handle))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn create_product(
    state: &AppState,
    actor: &Actor,
    payload: CreateProductRequest,
) -> AppResult<ProductModel> {
    validation::required("name", &payload.name, 100)?;
    validation::required("handle", &payload.handle, 100)?;
    validation::optional("tags", payload.tags.as_deref(), 100)?;
    validation::required("sales_account_code", &payload.sales_account_code, 100)?;
    validation::required("supplier_code", &payload.supplier_code, 100)?;
    validation::required("purchase_account_code", &payload.purchase_account_code, 100)?;

    let product = ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name),
        handle: Set(payload.handle),
        description: Set(payload.description),
        tags: Set(payload.tags),
        sales_account_code: Set(payload.sales_account_code),
        supplier_code: Set(payload.supplier_code),
        purchase_account_code: Set(payload.purchase_account_code),
        display_order: Set(payload.display_order),
        is_active: Set(payload.is_active),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, handle = %product.handle, "product created");
    Ok(product)
}

pub async fn update_product(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ProductModel> {
    let existing = get_product(state, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        validation::required("name", &name, 100)?;
        active.name = Set(name);
    }
    if let Some(handle) = payload.handle {
        validation::required("handle", &handle, 100)?;
        active.handle = Set(handle);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(tags) = payload.tags {
        validation::max_len("tags", &tags, 100)?;
        active.tags = Set(Some(tags));
    }
    if let Some(code) = payload.sales_account_code {
        validation::required("sales_account_code", &code, 100)?;
        active.sales_account_code = Set(code);
    }
    if let Some(code) = payload.supplier_code {
        validation::required("supplier_code", &code, 100)?;
        active.supplier_code = Set(code);
    }
    if let Some(code) = payload.purchase_account_code {
        validation::required("purchase_account_code", &code, 100)?;
        active.purchase_account_code = Set(code);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.modified_by = Set(actor.id());

    let product = active.update(&state.orm).await?;
    tracing::info!(product_id = %product.id, "product updated");
    Ok(product)
}

/// Deletes a product; prices, inventory, specs, pics and variant links go with it.
pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = %id, "product deleted");
    Ok(())
}

pub async fn product_detail(state: &AppState, id: Uuid) -> AppResult<ProductDetail> {
    let product = get_product(state, id).await?;

    let prices = product
        .find_related(Prices)
        .order_by_asc(prices::Column::Id)
        .all(&state.orm)
        .await?;
    let variants = product.find_related(Variants).all(&state.orm).await?;
    let inventory = Inventories::find()
        .filter(inventories::Column::ProductId.eq(product.id))
        .order_by_asc(inventories::Column::Sku)
        .find_also_related(StockControls)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(inventory, stock)| InventoryWithStock { inventory, stock })
        .collect();
    let specs = product
        .find_related(ProductSpecs)
        .order_by_asc(product_specs::Column::DisplayOrder)
        .order_by_asc(product_specs::Column::Id)
        .all(&state.orm)
        .await?;
    let pics = product
        .find_related(ProductPics)
        .order_by_asc(product_pics::Column::DisplayOrder)
        .order_by_asc(product_pics::Column::Id)
        .all(&state.orm)
        .await?;

    Ok(ProductDetail {
        product,
        prices,
        variants,
        inventory,
        specs,
        pics,
    })
}

pub async fn add_price(
    state: &AppState,
    actor: &Actor,
    product_id: Uuid,
    payload: CreatePriceRequest,
) -> AppResult<prices::Model> {
    validation::non_negative("supply_price", payload.supply_price)?;
    validation::non_negative("retail_price", payload.retail_price)?;
    if !payload.markup.is_finite() {
        return Err(AppError::validation("markup must be a finite number"));
    }
    let product = get_product(state, product_id).await?;

    let price = prices::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_id: Set(product.id),
        supply_price: Set(payload.supply_price),
        retail_price: Set(payload.retail_price),
        markup: Set(payload.markup),
        tax_id: Set(payload.tax_id),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, price_id = %price.id, "price added");
    Ok(price)
}

pub async fn list_prices(state: &AppState, product_id: Uuid) -> AppResult<Vec<prices::Model>> {
    let prices = Prices::find()
        .filter(prices::Column::ProductId.eq(product_id))
        .order_by_asc(prices::Column::Id)
        .all(&state.orm)
        .await?;
    Ok(prices)
}

/// Adds a specification line. A second spec with the same name on the same
/// product is rejected by the store.
pub async fn add_spec(
    state: &AppState,
    actor: &Actor,
    product_id: Uuid,
    payload: CreateProductSpecRequest,
) -> AppResult<product_specs::Model> {
    validation::required("name", &payload.name, 100)?;
    validation::max_len("value", &payload.value, 250)?;
    let product = get_product(state, product_id).await?;

    let spec = product_specs::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_id: Set(product.id),
        name: Set(payload.name),
        value: Set(payload.value),
        display_order: Set(payload.display_order),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, spec = %spec, "product spec added");
    Ok(spec)
}

pub async fn list_specs(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<Vec<product_specs::Model>> {
    let specs = ProductSpecs::find()
        .filter(product_specs::Column::ProductId.eq(product_id))
        .order_by_asc(product_specs::Column::DisplayOrder)
        .order_by_asc(product_specs::Column::Id)
        .all(&state.orm)
        .await?;
    Ok(specs)
}

pub async fn add_pic(
    state: &AppState,
    actor: &Actor,
    product_id: Uuid,
    payload: CreateProductPicRequest,
) -> AppResult<product_pics::Model> {
    validation::required("pic", &payload.pic, 255)?;
    let product = get_product(state, product_id).await?;

    let pic = product_pics::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_id: Set(product.id),
        pic: Set(payload.pic),
        display_order: Set(payload.display_order),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, pic_id = %pic.id, "product pic added");
    Ok(pic)
}

pub async fn list_pics(state: &AppState, product_id: Uuid) -> AppResult<Vec<product_pics::Model>> {
    let pics = ProductPics::find()
        .filter(product_pics::Column::ProductId.eq(product_id))
        .order_by_asc(product_pics::Column::DisplayOrder)
        .order_by_asc(product_pics::Column::Id)
        .all(&state.orm)
        .await?;
    Ok(pics)
}
