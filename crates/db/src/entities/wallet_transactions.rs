//! `SeaORM` Entity for wallet_transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EntryKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub kind: EntryKind,
    /// Strictly positive amount; the sign is carried by `kind`.
    pub amount: Decimal,
    pub description: String,
    pub entry_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_wallets::Entity",
        from = "Column::WalletId",
        to = "super::user_wallets::Column::Id"
    )]
    UserWallets,
}

impl Related<super::user_wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserWallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
