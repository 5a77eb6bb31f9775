//! Initial schema.
//!
//! - `users`: messenger users and their conversation state
//! - `tags`: categories each user accepted
//! - `targets`: monthly budget per tag
//! - `money_events`: recorded expenses (append-only)
//! - `feedback`: free text sent to the developers
//! - `outgoing_messages`: bot messages currently visible in each chat

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    State,
    Created,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    UserId,
    Tag,
}

#[derive(Iden)]
enum Targets {
    Table,
    Id,
    UserId,
    Tag,
    AmountMinor,
    PeriodStart,
    PeriodEnd,
}

#[derive(Iden)]
enum MoneyEvents {
    Table,
    Id,
    UserId,
    AmountMinor,
    Currency,
    Comment,
    Tag,
    Created,
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    UserId,
    Message,
    Created,
}

#[derive(Iden)]
enum OutgoingMessages {
    Table,
    Id,
    UserId,
    MessageId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::State)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Tags
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Tags::Tag).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tags-user_id")
                            .from(Tags::Table, Tags::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-tags-user_id-tag-unique")
                    .table(Tags::Table)
                    .col(Tags::UserId)
                    .col(Tags::Tag)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Targets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Targets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Targets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Targets::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Targets::Tag).string().not_null())
                    .col(
                        ColumnDef::new(Targets::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Targets::PeriodStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Targets::PeriodEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-targets-user_id")
                            .from(Targets::Table, Targets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-targets-tag-period_start-user_id-unique")
                    .table(Targets::Table)
                    .col(Targets::Tag)
                    .col(Targets::PeriodStart)
                    .col(Targets::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Money events
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(MoneyEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MoneyEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MoneyEvents::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MoneyEvents::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MoneyEvents::Currency)
                            .string()
                            .not_null()
                            .default("ARS"),
                    )
                    .col(
                        ColumnDef::new(MoneyEvents::Comment)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(MoneyEvents::Tag).string().not_null())
                    .col(
                        ColumnDef::new(MoneyEvents::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-money_events-user_id")
                            .from(MoneyEvents::Table, MoneyEvents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-money_events-user_id-created")
                    .table(MoneyEvents::Table)
                    .col(MoneyEvents::UserId)
                    .col(MoneyEvents::Created)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Feedback
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::Message).text().not_null())
                    .col(
                        ColumnDef::new(Feedback::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-feedback-user_id")
                            .from(Feedback::Table, Feedback::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Outgoing messages
        // ───────────────────────────────────────────────────────────────────
        // No foreign key: errors sent to users without a profile are tracked
        // too, so they can be removed on the next reply.
        manager
            .create_table(
                Table::create()
                    .table(OutgoingMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OutgoingMessages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OutgoingMessages::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OutgoingMessages::MessageId)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-outgoing_messages-user_id")
                    .table(OutgoingMessages::Table)
                    .col(OutgoingMessages::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(OutgoingMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MoneyEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Targets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
