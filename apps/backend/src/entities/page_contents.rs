use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "page_contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub page: String,
    pub field_key: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
