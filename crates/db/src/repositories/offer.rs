//! Offer repository for the offer → subscription lifecycle.
//!
//! Acceptance is the one multi-entity mutation here: the offer row update
//! and the new subscription row are committed together or not at all.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use velora_core::numbering;
use velora_core::offer::{OfferAction, OfferError, OfferService};
use velora_core::subscription::{BillingCycle, BillingSchedule};

use crate::entities::{
    offers, product_prices, subscriptions,
    sea_orm_active_enums::{OfferStatus, SubscriptionStatus},
};

/// Input for creating an offer.
#[derive(Debug, Clone)]
pub struct CreateOfferInput {
    /// The lead the offer targets.
    pub user_id: Uuid,
    /// The proposed product price.
    pub product_price_id: Uuid,
    /// The sales user extending the offer.
    pub created_by: Uuid,
}

/// Result of accepting an offer.
#[derive(Debug, Clone)]
pub struct AcceptedOffer {
    /// The offer, now accepted.
    pub offer: offers::Model,
    /// The subscription created from it, pending approval.
    pub subscription: subscriptions::Model,
}

/// Offer repository.
#[derive(Debug, Clone)]
pub struct OfferRepository {
    db: DatabaseConnection,
}

impl OfferRepository {
    /// Creates a new offer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending offer with a fresh offer number.
    ///
    /// # Errors
    ///
    /// Returns an error if the product price does not exist or the database
    /// operation fails.
    pub async fn create_offer(&self, input: CreateOfferInput) -> Result<offers::Model, OfferError> {
        product_prices::Entity::find_by_id(input.product_price_id)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or(OfferError::ProductPriceNotFound(input.product_price_id))?;

        let now = Utc::now().into();
        let offer = offers::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            product_price_id: Set(input.product_price_id),
            created_by: Set(input.created_by),
            offer_number: Set(numbering::offer_number()),
            status: Set(OfferStatus::Pending),
            accepted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let offer = offer
            .insert(&self.db)
            .await
            .map_err(map_db)?;

        info!(offer_id = %offer.id, offer_number = %offer.offer_number, "Offer created");
        Ok(offer)
    }

    /// Accepts a pending offer and creates a subscription from it.
    ///
    /// The offer must belong to the acting user and still be pending. The
    /// offer update and the subscription insert commit atomically; any
    /// failure leaves the offer untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The offer is not found
    /// - The acting user is not the offer's target
    /// - The offer has already been decided
    /// - The database operation fails
    pub async fn accept_offer(
        &self,
        offer_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<AcceptedOffer, OfferError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(map_db)?;

        let offer = Self::find_offer(&txn, offer_id).await?;

        let action =
            OfferService::accept(offer.status.clone().into(), offer.user_id, acting_user_id)?;
        let accepted_at = match action {
            OfferAction::Accept { accepted_at, .. } => accepted_at,
            OfferAction::Reject { .. } => {
                return Err(OfferError::Database(
                    "accept produced a reject action".to_string(),
                ));
            }
        };

        let price = product_prices::Entity::find_by_id(offer.product_price_id)
            .one(&txn)
            .await
            .map_err(map_db)?
            .ok_or(OfferError::ProductPriceNotFound(offer.product_price_id))?;

        let months = u32::try_from(price.billing_cycle_months)
            .ok()
            .and_then(BillingCycle::from_months)
            .ok_or(OfferError::InvalidBillingCycle(price.billing_cycle_months))?;

        // Offer-driven path: next billing is a fixed one-month lookahead.
        let schedule = BillingSchedule::offer_driven(accepted_at.date_naive(), months)
            .ok_or(OfferError::ScheduleOutOfRange)?;

        let now = Utc::now().into();
        let user_id = offer.user_id;
        let product_price_id = offer.product_price_id;

        let mut active: offers::ActiveModel = offer.into();
        active.status = Set(OfferStatus::Accepted);
        active.accepted_at = Set(Some(accepted_at.into()));
        active.updated_at = Set(now);
        let offer = active
            .update(&txn)
            .await
            .map_err(map_db)?;

        let subscription = subscriptions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            product_price_id: Set(product_price_id),
            approved_by: Set(None),
            subscription_number: Set(numbering::subscription_number()),
            start_date: Set(schedule.start_date),
            end_date: Set(schedule.end_date),
            next_billing_date: Set(schedule.next_billing_date),
            status: Set(SubscriptionStatus::PendingApproval),
            auto_renew: Set(false),
            approval_note: Set(None),
            approved_at: Set(None),
            rejection_note: Set(None),
            rejected_at: Set(None),
            cancellation_note: Set(None),
            cancelled_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let subscription = subscription
            .insert(&txn)
            .await
            .map_err(map_db)?;

        txn.commit()
            .await
            .map_err(map_db)?;

        info!(
            offer_id = %offer.id,
            subscription_id = %subscription.id,
            subscription_number = %subscription.subscription_number,
            "Offer accepted, subscription created"
        );

        Ok(AcceptedOffer {
            offer,
            subscription,
        })
    }

    /// Rejects a pending offer.
    ///
    /// Symmetric to [`accept_offer`](Self::accept_offer) but creates no
    /// subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the offer is not found, does not belong to the
    /// acting user, has already been decided, or the update fails.
    pub async fn reject_offer(
        &self,
        offer_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<offers::Model, OfferError> {
        // Rejection touches a single row, so no explicit transaction.
        let offer = offers::Entity::find_by_id(offer_id)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or(OfferError::OfferNotFound(offer_id))?;

        let _action =
            OfferService::reject(offer.status.clone().into(), offer.user_id, acting_user_id)?;

        let mut active: offers::ActiveModel = offer.into();
        active.status = Set(OfferStatus::Rejected);
        active.updated_at = Set(Utc::now().into());

        let offer = active.update(&self.db).await.map_err(map_db)?;
        info!(offer_id = %offer.id, "Offer rejected");
        Ok(offer)
    }

    /// Lists a user's offers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_offers(&self, user_id: Uuid) -> Result<Vec<offers::Model>, OfferError> {
        offers::Entity::find()
            .filter(offers::Column::UserId.eq(user_id))
            .order_by_desc(offers::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db)
    }

    async fn find_offer(
        txn: &DatabaseTransaction,
        offer_id: Uuid,
    ) -> Result<offers::Model, OfferError> {
        offers::Entity::find_by_id(offer_id)
            .one(txn)
            .await
            .map_err(map_db)?
            .ok_or(OfferError::OfferNotFound(offer_id))
    }
}

fn map_db(e: sea_orm::DbErr) -> OfferError {
    OfferError::Database(e.to_string())
}
