use sea_orm_migration::prelude::*;

mod m20240601_000001_create_payments_tables;
mod m20240601_000002_create_catalog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_payments_tables::Migration),
            Box::new(m20240601_000002_create_catalog_tables::Migration),
        ]
    }
}

/// Audit columns shared by every table.
#[derive(DeriveIden)]
enum Audit {
    CreatedOn,
    ModifiedOn,
    CreatedBy,
    ModifiedBy,
}

fn audit_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Audit::CreatedOn)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Audit::ModifiedOn)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Audit::CreatedBy).uuid().null())
        .col(ColumnDef::new(Audit::ModifiedBy).uuid().null())
}
