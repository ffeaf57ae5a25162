use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Company,
    Service,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DomainContacts {
    Table,
    Id,
    DomainName,
    FullName,
    Email,
    Phone,
    Note,
    CreatedAt,
}

#[derive(Iden)]
enum Articles {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    CoverImage,
    Category,
    Tags,
    Author,
    Published,
    Featured,
    ViewCount,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ServerEquipment {
    Table,
    Id,
    Sku,
    Name,
    Category,
    Brand,
    Description,
    PriceVnd,
    Stock,
    ImageUrl,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PageContents {
    Table,
    Id,
    Page,
    FieldKey,
    Value,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // contacts (leads)
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(id_col(Contacts::Id))
                    .col(ColumnDef::new(Contacts::FullName).string_len(100).not_null())
                    .col(ColumnDef::new(Contacts::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Contacts::Company).string_len(150).null())
                    .col(ColumnDef::new(Contacts::Service).string_len(100).null())
                    .col(ColumnDef::new(Contacts::Message).text().not_null())
                    .col(
                        ColumnDef::new(Contacts::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(timestamp_col(Contacts::CreatedAt))
                    .col(timestamp_col(Contacts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_status_created_at")
                    .table(Contacts::Table)
                    .col(Contacts::Status)
                    .col(Contacts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // domain_contacts
        manager
            .create_table(
                Table::create()
                    .table(DomainContacts::Table)
                    .if_not_exists()
                    .col(id_col(DomainContacts::Id))
                    .col(
                        ColumnDef::new(DomainContacts::DomainName)
                            .string_len(253)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DomainContacts::FullName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DomainContacts::Email).string_len(255).not_null())
                    .col(ColumnDef::new(DomainContacts::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(DomainContacts::Note).text().null())
                    .col(timestamp_col(DomainContacts::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // articles
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(id_col(Articles::Id))
                    .col(ColumnDef::new(Articles::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Articles::Slug).string_len(160).not_null())
                    .col(ColumnDef::new(Articles::Excerpt).string_len(500).null())
                    .col(ColumnDef::new(Articles::Content).text().not_null())
                    .col(ColumnDef::new(Articles::CoverImage).string_len(500).null())
                    .col(ColumnDef::new(Articles::Category).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Articles::Tags)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Articles::Author).string_len(100).null())
                    .col(
                        ColumnDef::new(Articles::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Articles::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Articles::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Articles::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_col(Articles::CreatedAt))
                    .col(timestamp_col(Articles::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_articles_slug")
                    .table(Articles::Table)
                    .col(Articles::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_published_category")
                    .table(Articles::Table)
                    .col(Articles::Published)
                    .col(Articles::Category)
                    .to_owned(),
            )
            .await?;

        // server_equipment
        manager
            .create_table(
                Table::create()
                    .table(ServerEquipment::Table)
                    .if_not_exists()
                    .col(id_col(ServerEquipment::Id))
                    .col(ColumnDef::new(ServerEquipment::Sku).string_len(64).not_null())
                    .col(ColumnDef::new(ServerEquipment::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(ServerEquipment::Category)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServerEquipment::Brand).string_len(100).null())
                    .col(ColumnDef::new(ServerEquipment::Description).text().null())
                    .col(
                        ColumnDef::new(ServerEquipment::PriceVnd)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServerEquipment::Stock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ServerEquipment::ImageUrl)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServerEquipment::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp_col(ServerEquipment::CreatedAt))
                    .col(timestamp_col(ServerEquipment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_server_equipment_sku")
                    .table(ServerEquipment::Table)
                    .col(ServerEquipment::Sku)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // page_contents (CMS)
        manager
            .create_table(
                Table::create()
                    .table(PageContents::Table)
                    .if_not_exists()
                    .col(id_col(PageContents::Id))
                    .col(ColumnDef::new(PageContents::Page).string_len(100).not_null())
                    .col(
                        ColumnDef::new(PageContents::FieldKey)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PageContents::Value).text().not_null())
                    .col(timestamp_col(PageContents::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_page_contents_page_field_key")
                    .table(PageContents::Table)
                    .col(PageContents::Page)
                    .col(PageContents::FieldKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PageContents::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(ServerEquipment::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(DomainContacts::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
