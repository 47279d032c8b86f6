use sea_orm::entity::prelude::*;

/// Singleton row; replaced wholesale when the superuser sets a new policy.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "password_policy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub length: i32,

    pub numbers: bool,

    pub uppercase_letters: bool,

    pub lowercase_letters: bool,

    pub special_symbols: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
