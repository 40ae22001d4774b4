//! Profile screen: the signed-in user's orders.

use std::sync::Arc;

use tracing::warn;

use crate::application::dto::{OrderSummary, ProfileView};
use crate::application::error::ActionError;
use crate::application::session::SessionContext;
use crate::domain::entities::OrderFilter;
use crate::domain::ports::StorefrontPort;

pub const MY_ORDERS_FAILED: &str = "Failed to load your orders";

#[derive(Clone)]
pub struct ProfileUseCase {
    storefront: Arc<dyn StorefrontPort>,
    session: SessionContext,
}

impl ProfileUseCase {
    #[must_use]
    pub fn new(storefront: Arc<dyn StorefrontPort>, session: SessionContext) -> Self {
        Self {
            storefront,
            session,
        }
    }

    /// Orders of the current user, newest first, with status counters.
    /// Signed-out users get an empty view.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn load(&self) -> Result<ProfileView, ActionError> {
        let Some(token) = self.session.token() else {
            return Ok(ProfileView::default());
        };

        let orders = self.storefront.my_orders(&token).await.map_err(|e| {
            warn!(error = %e, "Failed to fetch own orders");
            ActionError::from_api(&e, MY_ORDERS_FAILED)
        })?;

        let orders: Vec<_> = OrderFilter::default()
            .apply(&orders)
            .into_iter()
            .cloned()
            .collect();
        let summary = OrderSummary::from_orders(&orders);

        Ok(ProfileView { orders, summary })
    }
}
