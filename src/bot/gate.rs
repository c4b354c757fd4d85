//! Channel membership gate
//!
//! Every command runs behind this check. Lookup failures deny access.

use crate::services::MembershipChecker;
use std::sync::Arc;
use tracing::{debug, error};

/// Decides whether a user may use the bot
#[derive(Clone)]
pub struct MembershipGate {
    checker: Arc<dyn MembershipChecker>,
    channel: String,
}

impl MembershipGate {
    /// Create a gate checking membership in `channel`
    pub fn new(checker: Arc<dyn MembershipChecker>, channel: impl Into<String>) -> Self {
        Self {
            checker,
            channel: channel.into(),
        }
    }

    /// Channel identifier users are asked to join
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Returns `true` if the user is a member, administrator or owner.
    ///
    /// Any failure of the membership lookup is logged and treated as "not a member".
    pub async fn is_member(&self, user_id: i64) -> bool {
        match self.checker.membership_status(&self.channel, user_id).await {
            Ok(status) => {
                debug!(user_id, ?status, "Membership checked");
                status.is_member()
            }
            Err(e) => {
                error!("Error checking channel membership for user {user_id}: {e}");
                false
            }
        }
    }
}
