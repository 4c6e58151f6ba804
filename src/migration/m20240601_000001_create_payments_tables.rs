use sea_orm_migration::prelude::*;

use super::audit_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut card_issuer = Table::create();
        card_issuer
            .table(CardIssuer::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(CardIssuer::Descriptor)
                    .string_len(100)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(CardIssuer::Name).string_len(100).not_null())
            .col(
                ColumnDef::new(CardIssuer::IsActive)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        audit_columns(&mut card_issuer);
        manager.create_table(card_issuer).await?;

        let mut gateway = Table::create();
        gateway
            .table(Gateway::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Gateway::Name)
                    .string_len(10)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Gateway::Account).string_len(100).not_null())
            .col(ColumnDef::new(Gateway::IsActive).boolean().not_null().default(false))
            .col(ColumnDef::new(Gateway::IsSandbox).boolean().not_null().default(false))
            .col(
                ColumnDef::new(Gateway::AcceptCreditCard)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Gateway::AcceptAccount)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        audit_columns(&mut gateway);
        manager.create_table(gateway).await?;

        // Only rows with the flag set enter the index, so at most one can exist.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_payments_gateway_credit_card \
                 ON payments_gateway (accept_credit_card) WHERE accept_credit_card = TRUE",
            )
            .await?;

        let mut gateway_param = Table::create();
        gateway_param
            .table(GatewayParam::Table)
            .if_not_exists()
            .col(ColumnDef::new(GatewayParam::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(GatewayParam::GatewayName).string_len(10).not_null())
            .col(ColumnDef::new(GatewayParam::Name).string_len(250).not_null())
            .col(ColumnDef::new(GatewayParam::Value).string_len(500).not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_payments_gateway_param_gateway")
                    .from(GatewayParam::Table, GatewayParam::GatewayName)
                    .to(Gateway::Table, Gateway::Name)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut gateway_param);
        manager.create_table(gateway_param).await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_payments_gateway_param_gateway_name")
                    .table(GatewayParam::Table)
                    .col(GatewayParam::GatewayName)
                    .col(GatewayParam::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        let mut transaction = Table::create();
        transaction
            .table(Transaction::Table)
            .if_not_exists()
            .col(ColumnDef::new(Transaction::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Transaction::GatewayName).string_len(10).not_null())
            .col(ColumnDef::new(Transaction::OrderId).uuid().not_null())
            .col(ColumnDef::new(Transaction::Description).string_len(250).not_null())
            .col(
                ColumnDef::new(Transaction::ErrorMessage)
                    .string_len(1000)
                    .not_null()
                    .default(""),
            )
            .col(ColumnDef::new(Transaction::Status).string_len(20).not_null())
            .col(ColumnDef::new(Transaction::Currency).string_len(3).not_null())
            .col(ColumnDef::new(Transaction::Amount).big_integer().not_null())
            .col(ColumnDef::new(Transaction::RefundAmount).big_integer().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_payments_transaction_gateway")
                    .from(Transaction::Table, Transaction::GatewayName)
                    .to(Gateway::Table, Gateway::Name)
                    .on_delete(ForeignKeyAction::Restrict),
            );
        audit_columns(&mut transaction);
        manager.create_table(transaction).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_transaction_order_id")
                    .table(Transaction::Table)
                    .col(Transaction::OrderId)
                    .to_owned(),
            )
            .await?;

        let mut transaction_param = Table::create();
        transaction_param
            .table(TransactionParam::Table)
            .if_not_exists()
            .col(ColumnDef::new(TransactionParam::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(TransactionParam::TransactionId).uuid().not_null())
            .col(ColumnDef::new(TransactionParam::Name).string_len(100).not_null())
            .col(ColumnDef::new(TransactionParam::Value).string_len(250).not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_payments_transaction_param_transaction")
                    .from(TransactionParam::Table, TransactionParam::TransactionId)
                    .to(Transaction::Table, Transaction::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut transaction_param);
        manager.create_table(transaction_param).await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_payments_transaction_param_transaction_name")
                    .table(TransactionParam::Table)
                    .col(TransactionParam::TransactionId)
                    .col(TransactionParam::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransactionParam::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transaction::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GatewayParam::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Gateway::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CardIssuer::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum CardIssuer {
    #[sea_orm(iden = "payments_card_issuer")]
    Table,
    Descriptor,
    Name,
    IsActive,
}

#[derive(DeriveIden)]
enum Gateway {
    #[sea_orm(iden = "payments_gateway")]
    Table,
    Name,
    Account,
    IsActive,
    IsSandbox,
    AcceptCreditCard,
    AcceptAccount,
}

#[derive(DeriveIden)]
enum GatewayParam {
    #[sea_orm(iden = "payments_gateway_param")]
    Table,
    Id,
    GatewayName,
    Name,
    Value,
}

#[derive(DeriveIden)]
enum Transaction {
    #[sea_orm(iden = "payments_transaction")]
    Table,
    Id,
    GatewayName,
    OrderId,
    Description,
    ErrorMessage,
    Status,
    Currency,
    Amount,
    RefundAmount,
}

#[derive(DeriveIden)]
enum TransactionParam {
    #[sea_orm(iden = "payments_transaction_param")]
    Table,
    Id,
    TransactionId,
    Name,
    Value,
}
