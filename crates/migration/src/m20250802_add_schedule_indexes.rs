use crate::m20250801_create_scheduling_tables::Schedules;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookups by key and lifecycle stage
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_year_term_status")
                    .table(Schedules::Table)
                    .col(Schedules::Year)
                    .col(Schedules::Term)
                    .col(Schedules::Status)
                    .to_owned(),
            )
            .await?;

        // At most one draft per (year, term); approved rows are unconstrained
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_schedules_live_draft
                ON schedules (year, term) WHERE status = 'draft';",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS uq_schedules_live_draft;")
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_schedules_year_term_status")
                    .table(Schedules::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
