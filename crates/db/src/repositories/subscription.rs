//! Subscription repository for the approval lifecycle.
//!
//! Approval is the multi-entity mutation here: the status update and the
//! subscriber's customer grant commit together. Rejection and cancellation
//! are single-row updates.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use velora_core::numbering;
use velora_core::subscription::{
    BillingCycle, BillingSchedule, SubscriptionAction, SubscriptionError, SubscriptionService,
};

use crate::entities::{
    product_prices, subscriptions, sea_orm_active_enums::SubscriptionStatus, users,
};

/// Subscription repository.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    db: DatabaseConnection,
}

impl SubscriptionRepository {
    /// Creates a new subscription repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Approves a pending subscription and grants the subscriber the
    /// customer capability.
    ///
    /// The grant is idempotent: a user who is already a customer is left
    /// untouched. Status update and grant commit atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription or subscriber is not found, the
    /// subscription is not pending approval, or the database operation fails.
    pub async fn approve(
        &self,
        subscription_id: Uuid,
        approver_id: Uuid,
        approval_note: Option<String>,
    ) -> Result<subscriptions::Model, SubscriptionError> {
        let txn = self.db.begin().await.map_err(map_db)?;

        let subscription = subscriptions::Entity::find_by_id(subscription_id)
            .one(&txn)
            .await
            .map_err(map_db)?
            .ok_or(SubscriptionError::SubscriptionNotFound(subscription_id))?;

        let action = SubscriptionService::approve(
            subscription.status.clone().into(),
            approver_id,
            approval_note,
        )?;
        let (approved_by, approved_at, approval_note) = match action {
            SubscriptionAction::Approve {
                approved_by,
                approved_at,
                approval_note,
                ..
            } => (approved_by, approved_at, approval_note),
            SubscriptionAction::Reject { .. } | SubscriptionAction::Cancel { .. } => {
                return Err(SubscriptionError::Database(
                    "approve produced a non-approve action".to_string(),
                ));
            }
        };

        let user_id = subscription.user_id;
        let mut active: subscriptions::ActiveModel = subscription.into();
        active.status = Set(SubscriptionStatus::Approved);
        active.approved_by = Set(Some(approved_by));
        active.approved_at = Set(Some(approved_at.into()));
        active.approval_note = Set(approval_note);
        active.updated_at = Set(Utc::now().into());
        let subscription = active.update(&txn).await.map_err(map_db)?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(map_db)?
            .ok_or(SubscriptionError::UserNotFound(user_id))?;

        let granted = !user.is_customer;
        if granted {
            let mut active: users::ActiveModel = user.into();
            active.is_customer = Set(true);
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await.map_err(map_db)?;
        }

        txn.commit().await.map_err(map_db)?;

        info!(
            subscription_id = %subscription.id,
            approved_by = %approved_by,
            customer_granted = granted,
            "Subscription approved"
        );
        Ok(subscription)
    }

    /// Rejects a pending subscription with a mandatory note.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription is not found, the note is blank,
    /// the subscription is not pending approval, or the update fails.
    pub async fn reject(
        &self,
        subscription_id: Uuid,
        rejection_note: String,
    ) -> Result<subscriptions::Model, SubscriptionError> {
        let subscription = Self::find(&self.db, subscription_id).await?;

        let action =
            SubscriptionService::reject(subscription.status.clone().into(), rejection_note)?;
        let (rejection_note, rejected_at) = match action {
            SubscriptionAction::Reject {
                rejection_note,
                rejected_at,
                ..
            } => (rejection_note, rejected_at),
            SubscriptionAction::Approve { .. } | SubscriptionAction::Cancel { .. } => {
                return Err(SubscriptionError::Database(
                    "reject produced a non-reject action".to_string(),
                ));
            }
        };

        let mut active: subscriptions::ActiveModel = subscription.into();
        active.status = Set(SubscriptionStatus::Rejected);
        active.rejection_note = Set(Some(rejection_note));
        active.rejected_at = Set(Some(rejected_at.into()));
        active.updated_at = Set(Utc::now().into());

        let subscription = active.update(&self.db).await.map_err(map_db)?;
        info!(subscription_id = %subscription.id, "Subscription rejected");
        Ok(subscription)
    }

    /// Cancels an active subscription with a mandatory note.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription is not found, the note is blank,
    /// the subscription is not active, or the update fails.
    pub async fn cancel(
        &self,
        subscription_id: Uuid,
        cancellation_note: String,
    ) -> Result<subscriptions::Model, SubscriptionError> {
        let subscription = Self::find(&self.db, subscription_id).await?;

        let action =
            SubscriptionService::cancel(subscription.status.clone().into(), cancellation_note)?;
        let (cancellation_note, cancelled_at) = match action {
            SubscriptionAction::Cancel {
                cancellation_note,
                cancelled_at,
                ..
            } => (cancellation_note, cancelled_at),
            SubscriptionAction::Approve { .. } | SubscriptionAction::Reject { .. } => {
                return Err(SubscriptionError::Database(
                    "cancel produced a non-cancel action".to_string(),
                ));
            }
        };

        let mut active: subscriptions::ActiveModel = subscription.into();
        active.status = Set(SubscriptionStatus::Cancelled);
        active.cancellation_note = Set(Some(cancellation_note));
        active.cancelled_at = Set(Some(cancelled_at.into()));
        active.updated_at = Set(Utc::now().into());

        let subscription = active.update(&self.db).await.map_err(map_db)?;
        info!(subscription_id = %subscription.id, "Subscription cancelled");
        Ok(subscription)
    }

    /// Creates a pending subscription from a user's direct application.
    ///
    /// Uses the cycle-aware schedule: the next billing date is the end of the
    /// first term, not a fixed one-month lookahead.
    ///
    /// # Errors
    ///
    /// Returns an error if the user or product price is not found, the price
    /// carries an invalid billing cycle, or the insert fails.
    pub async fn self_apply(
        &self,
        user_id: Uuid,
        product_price_id: Uuid,
    ) -> Result<subscriptions::Model, SubscriptionError> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or(SubscriptionError::UserNotFound(user_id))?;

        let price = product_prices::Entity::find_by_id(product_price_id)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or(SubscriptionError::ProductPriceNotFound(product_price_id))?;

        let months = u32::try_from(price.billing_cycle_months)
            .ok()
            .and_then(BillingCycle::from_months)
            .ok_or(SubscriptionError::InvalidBillingCycle(
                price.billing_cycle_months,
            ))?;

        let now = Utc::now();
        let schedule = BillingSchedule::self_apply(now.date_naive(), months)
            .ok_or(SubscriptionError::ScheduleOutOfRange)?;

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
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let subscription = subscription.insert(&self.db).await.map_err(map_db)?;
        info!(
            subscription_id = %subscription.id,
            subscription_number = %subscription.subscription_number,
            "Subscription application submitted"
        );
        Ok(subscription)
    }

    /// Lists a user's subscriptions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<subscriptions::Model>, SubscriptionError> {
        subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db)
    }

    async fn find<C>(conn: &C, subscription_id: Uuid) -> Result<subscriptions::Model, SubscriptionError>
    where
        C: sea_orm::ConnectionTrait,
    {
        subscriptions::Entity::find_by_id(subscription_id)
            .one(conn)
            .await
            .map_err(map_db)?
            .ok_or(SubscriptionError::SubscriptionNotFound(subscription_id))
    }
}

fn map_db(e: sea_orm::DbErr) -> SubscriptionError {
    SubscriptionError::Database(e.to_string())
}
