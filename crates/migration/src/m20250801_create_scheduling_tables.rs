use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Shorthand)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(json_list(Courses::Equipment))
                    .col(json_list(Courses::Prerequisites))
                    .col(json_list(Courses::Corequisites))
                    .col(json_list(Courses::TermsOffered))
                    .col(timestamp(Courses::CreatedAt))
                    .col(timestamp(Courses::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create classrooms table, keyed by building and room together
        manager
            .create_table(
                Table::create()
                    .table(Classrooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classrooms::Building).string().not_null())
                    .col(ColumnDef::new(Classrooms::Room).string().not_null())
                    .col(
                        ColumnDef::new(Classrooms::Capacity)
                            .integer()
                            .not_null()
                            .check(Expr::col(Classrooms::Capacity).gte(0)),
                    )
                    .col(json_list(Classrooms::Equipment))
                    .col(timestamp(Classrooms::CreatedAt))
                    .col(timestamp(Classrooms::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .name("pk-classrooms")
                            .col(Classrooms::Building)
                            .col(Classrooms::Room),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Firstname).string().not_null().default(""))
                    .col(ColumnDef::new(Users::Lastname).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::Preferences)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(json_list(Users::Qualifications))
                    .col(
                        ColumnDef::new(Users::Availability)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create schedules table; drafts and approved schedules share it
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Schedules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schedules::Year).integer().not_null())
                    .col(ColumnDef::new(Schedules::Term).string().not_null())
                    .col(ColumnDef::new(Schedules::Status).string().not_null())
                    .col(ColumnDef::new(Schedules::Terms).json_binary().not_null())
                    .col(timestamp(Schedules::CreatedAt))
                    .col(timestamp(Schedules::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classrooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// A JSONB column holding an array, empty by default
fn json_list<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .json_binary()
        .not_null()
        .default(Expr::cust("'[]'::jsonb"))
        .to_owned()
}

fn timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    Shorthand,
    Name,
    Equipment,
    Prerequisites,
    Corequisites,
    TermsOffered,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Classrooms {
    Table,
    Building,
    Room,
    Capacity,
    Equipment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Username,
    Email,
    Firstname,
    Lastname,
    IsAdmin,
    Preferences,
    Qualifications,
    Availability,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Schedules {
    Table,
    Id,
    Year,
    Term,
    Status,
    Terms,
    CreatedAt,
    UpdatedAt,
}
