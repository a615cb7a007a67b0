//! Client side: store access, editing session, and view state.

pub mod api;
pub mod notify;
pub mod session;
pub mod view;

pub use api::{ClientError, StoreClient};
pub use notify::{Notification, NotificationKind};
pub use session::{Outcome, Session};
pub use view::{LightSelect, Row, Table, ZoneSelect, ZONE_PLACEHOLDER};

use crate::models::Plant;

/// Pushes the whole collection to the store once.
///
/// Failures are logged and turned into an error notification; they never end
/// the session and are not retried.
pub async fn persist(client: &StoreClient, plants: &[Plant]) -> Option<Notification> {
    match client.save(plants).await {
        Ok(response) => {
            tracing::debug!("{}", response.message);
            None
        }
        Err(e) => {
            tracing::error!("Error saving data: {}", e);
            Some(Notification::error(format!("Error saving data: {}", e)))
        }
    }
}
