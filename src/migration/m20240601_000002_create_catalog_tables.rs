use sea_orm_migration::prelude::*;

use super::audit_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut manufacturer = Table::create();
        manufacturer
            .table(Manufacturer::Table)
            .if_not_exists()
            .col(ColumnDef::new(Manufacturer::Id).uuid().not_null().primary_key())
            .col(
                ColumnDef::new(Manufacturer::Name)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Manufacturer::Description).text().null())
            .col(
                ColumnDef::new(Manufacturer::IsActive)
                    .boolean()
                    .not_null()
                    .default(true),
            );
        audit_columns(&mut manufacturer);
        manager.create_table(manufacturer).await?;

        let mut category = Table::create();
        category
            .table(Category::Table)
            .if_not_exists()
            .col(ColumnDef::new(Category::Id).uuid().not_null().primary_key())
            .col(
                ColumnDef::new(Category::Name)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(Category::Slug)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Category::Description).text().null())
            .col(ColumnDef::new(Category::Pic).string_len(255).null())
            .col(ColumnDef::new(Category::ParentId).uuid().null())
            .col(ColumnDef::new(Category::Tags).string_len(100).null())
            .col(
                ColumnDef::new(Category::DisplayOrder)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(Category::IsActive).boolean().not_null().default(true))
            .col(
                ColumnDef::new(Category::IsExpanded)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_category_parent")
                    .from(Category::Table, Category::ParentId)
                    .to(Category::Table, Category::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut category);
        manager.create_table(category).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_category_parent_id")
                    .table(Category::Table)
                    .col(Category::ParentId)
                    .to_owned(),
            )
            .await?;

        let mut product = Table::create();
        product
            .table(Product::Table)
            .if_not_exists()
            .col(ColumnDef::new(Product::Id).uuid().not_null().primary_key())
            .col(
                ColumnDef::new(Product::Name)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(Product::Handle)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Product::Description).text().null())
            .col(ColumnDef::new(Product::Tags).string_len(100).null())
            .col(
                ColumnDef::new(Product::SalesAccountCode)
                    .string_len(100)
                    .not_null(),
            )
            .col(ColumnDef::new(Product::SupplierCode).string_len(100).not_null())
            .col(
                ColumnDef::new(Product::PurchaseAccountCode)
                    .string_len(100)
                    .not_null(),
            )
            .col(
                ColumnDef::new(Product::DisplayOrder)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(Product::IsActive).boolean().not_null().default(true));
        audit_columns(&mut product);
        manager.create_table(product).await?;

        let mut price = Table::create();
        price
            .table(Price::Table)
            .if_not_exists()
            .col(ColumnDef::new(Price::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Price::ProductId).uuid().not_null())
            .col(ColumnDef::new(Price::SupplyPrice).big_integer().not_null())
            .col(ColumnDef::new(Price::RetailPrice).big_integer().not_null())
            .col(ColumnDef::new(Price::Markup).double().not_null().default(0.0))
            .col(ColumnDef::new(Price::TaxId).uuid().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_price_product")
                    .from(Price::Table, Price::ProductId)
                    .to(Product::Table, Product::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut price);
        manager.create_table(price).await?;

        let mut variant = Table::create();
        variant
            .table(Variant::Table)
            .if_not_exists()
            .col(ColumnDef::new(Variant::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Variant::HasVariant).boolean().not_null().default(true))
            .col(ColumnDef::new(Variant::DefaultValue).string_len(100).not_null());
        audit_columns(&mut variant);
        manager.create_table(variant).await?;

        manager
            .create_table(
                Table::create()
                    .table(VariantProduct::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VariantProduct::VariantId).uuid().not_null())
                    .col(ColumnDef::new(VariantProduct::ProductId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(VariantProduct::VariantId)
                            .col(VariantProduct::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_variant_product_variant")
                            .from(VariantProduct::Table, VariantProduct::VariantId)
                            .to(Variant::Table, Variant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_variant_product_product")
                            .from(VariantProduct::Table, VariantProduct::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let mut attribute = Table::create();
        attribute
            .table(Attribute::Table)
            .if_not_exists()
            .col(ColumnDef::new(Attribute::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Attribute::VariantId).uuid().not_null())
            .col(ColumnDef::new(Attribute::OptionName).string_len(100).not_null())
            .col(ColumnDef::new(Attribute::DefaultValue).string_len(100).not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_attribute_variant")
                    .from(Attribute::Table, Attribute::VariantId)
                    .to(Variant::Table, Variant::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut attribute);
        manager.create_table(attribute).await?;

        let mut inventory = Table::create();
        inventory
            .table(Inventory::Table)
            .if_not_exists()
            .col(ColumnDef::new(Inventory::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Inventory::ProductId).uuid().not_null())
            .col(
                ColumnDef::new(Inventory::Sku)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Inventory::StockType).string_len(20).not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_inventory_product")
                    .from(Inventory::Table, Inventory::ProductId)
                    .to(Product::Table, Product::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut inventory);
        manager.create_table(inventory).await?;

        let mut stock_control = Table::create();
        stock_control
            .table(StockControl::Table)
            .if_not_exists()
            .col(ColumnDef::new(StockControl::Id).uuid().not_null().primary_key())
            .col(
                ColumnDef::new(StockControl::InventoryId)
                    .uuid()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(StockControl::CurrentStock)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(StockControl::ReorderPoint)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(StockControl::ReorderAmount)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_stock_control_inventory")
                    .from(StockControl::Table, StockControl::InventoryId)
                    .to(Inventory::Table, Inventory::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut stock_control);
        manager.create_table(stock_control).await?;

        let mut product_spec = Table::create();
        product_spec
            .table(ProductSpec::Table)
            .if_not_exists()
            .col(ColumnDef::new(ProductSpec::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(ProductSpec::ProductId).uuid().not_null())
            .col(ColumnDef::new(ProductSpec::Name).string_len(100).not_null())
            .col(ColumnDef::new(ProductSpec::Value).string_len(250).not_null())
            .col(
                ColumnDef::new(ProductSpec::DisplayOrder)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_product_spec_product")
                    .from(ProductSpec::Table, ProductSpec::ProductId)
                    .to(Product::Table, Product::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut product_spec);
        manager.create_table(product_spec).await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_catalog_product_spec_product_name")
                    .table(ProductSpec::Table)
                    .col(ProductSpec::ProductId)
                    .col(ProductSpec::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        let mut product_pic = Table::create();
        product_pic
            .table(ProductPic::Table)
            .if_not_exists()
            .col(ColumnDef::new(ProductPic::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(ProductPic::ProductId).uuid().not_null())
            .col(ColumnDef::new(ProductPic::Pic).string_len(255).not_null())
            .col(
                ColumnDef::new(ProductPic::DisplayOrder)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_catalog_product_pic_product")
                    .from(ProductPic::Table, ProductPic::ProductId)
                    .to(Product::Table, Product::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut product_pic);
        manager.create_table(product_pic).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductPic::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductSpec::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockControl::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inventory::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attribute::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VariantProduct::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Variant::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Price::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Product::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Manufacturer::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Manufacturer {
    #[sea_orm(iden = "catalog_manufacturer")]
    Table,
    Id,
    Name,
    Description,
    IsActive,
}

#[derive(DeriveIden)]
enum Category {
    #[sea_orm(iden = "catalog_category")]
    Table,
    Id,
    Name,
    Slug,
    Description,
    Pic,
    ParentId,
    Tags,
    DisplayOrder,
    IsActive,
    IsExpanded,
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "catalog_product")]
    Table,
    Id,
    Name,
    Handle,
    Description,
    Tags,
    SalesAccountCode,
    SupplierCode,
    PurchaseAccountCode,
    DisplayOrder,
    IsActive,
}

#[derive(DeriveIden)]
enum Price {
    #[sea_orm(iden = "catalog_price")]
    Table,
    Id,
    ProductId,
    SupplyPrice,
    RetailPrice,
    Markup,
    TaxId,
}

#[derive(DeriveIden)]
enum Variant {
    #[sea_orm(iden = "catalog_variant")]
    Table,
    Id,
    HasVariant,
    DefaultValue,
}

#[derive(DeriveIden)]
enum VariantProduct {
    #[sea_orm(iden = "catalog_variant_product")]
    Table,
    VariantId,
    ProductId,
}

#[derive(DeriveIden)]
enum Attribute {
    #[sea_orm(iden = "catalog_attribute")]
    Table,
    Id,
    VariantId,
    OptionName,
    DefaultValue,
}

#[derive(DeriveIden)]
enum Inventory {
    #[sea_orm(iden = "catalog_inventory")]
    Table,
    Id,
    ProductId,
    Sku,
    StockType,
}

#[derive(DeriveIden)]
enum StockControl {
    #[sea_orm(iden = "catalog_stock_control")]
    Table,
    Id,
    InventoryId,
    CurrentStock,
    ReorderPoint,
    ReorderAmount,
}

#[derive(DeriveIden)]
enum ProductSpec {
    #[sea_orm(iden = "catalog_product_spec")]
    Table,
    Id,
    ProductId,
    Name,
    Value,
    DisplayOrder,
}

#[derive(DeriveIden)]
enum ProductPic {
    #[sea_orm(iden = "catalog_product_pic")]
    Table,
    Id,
    ProductId,
    Pic,
    DisplayOrder,
}
