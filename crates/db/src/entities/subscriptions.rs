//! `SeaORM` Entity for subscriptions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::SubscriptionStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_price_id: Uuid,
    pub approved_by: Option<Uuid>,
    #[sea_orm(unique)]
    pub subscription_number: String,
    pub start_date: Date,
    pub end_date: Date,
    pub next_billing_date: Date,
    pub status: SubscriptionStatus,
    pub auto_renew: bool,
    pub approval_note: Option<String>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub rejection_note: Option<String>,
    pub rejected_at: Option<DateTimeWithTimeZone>,
    pub cancellation_note: Option<String>,
    pub cancelled_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::product_prices::Entity",
        from = "Column::ProductPriceId",
        to = "super::product_prices::Column::Id"
    )]
    ProductPrices,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::product_prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductPrices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
