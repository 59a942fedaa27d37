//! Order status lifecycle.
//!
//! ```text
//! Pending ──> Processing ──> Completed
//!    │            │
//!    ├────────────┴──> Declined   (admin)
//!    └────────────┴──> Cancelled  (owner)
//! ```
//!
//! Owners may only cancel, and only while the order is still open. Admins may set any status
//! other than `Cancelled`, whatever the current one is.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Declined,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Declined => "Declined",
            Self::Cancelled => "Cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        match self {
            Self::Pending | Self::Processing => false,
            Self::Completed | Self::Declined | Self::Cancelled => true,
        }
    }

    /// Compute the status that results from `transition`.
    pub fn apply(self, transition: OrderTransition) -> Result<Self, InvalidTransition> {
        match transition {
            OrderTransition::Cancel => match self {
                Self::Pending | Self::Processing => Ok(Self::Cancelled),
                Self::Completed | Self::Declined | Self::Cancelled => {
                    Err(InvalidTransition { current: self })
                }
            },
            OrderTransition::AdminSet(target) => Ok(target.into()),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownOrderStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Completed" => Ok(Self::Completed),
            "Declined" => Ok(Self::Declined),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Statuses an admin may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminStatus {
    Pending,
    Processing,
    Completed,
    Declined,
}

impl FromStr for AdminStatus {
    type Err = UnknownOrderStatus;

    /// Names are matched exactly; `Cancelled` is reserved for owners.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Completed" => Ok(Self::Completed),
            "Declined" => Ok(Self::Declined),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

impl From<AdminStatus> for OrderStatus {
    fn from(status: AdminStatus) -> Self {
        match status {
            AdminStatus::Pending => Self::Pending,
            AdminStatus::Processing => Self::Processing,
            AdminStatus::Completed => Self::Completed,
            AdminStatus::Declined => Self::Declined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTransition {
    /// The owner withdraws the order.
    Cancel,
    /// An admin assigns a status directly.
    AdminSet(AdminStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot cancel an order with status '{current}'")]
pub struct InvalidTransition {
    pub current: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Declined,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn open_orders_can_be_cancelled() {
        for status in [OrderStatus::Pending, OrderStatus::Processing] {
            assert_eq!(
                status.apply(OrderTransition::Cancel),
                Ok(OrderStatus::Cancelled)
            );
        }
    }

    #[test]
    fn terminal_orders_cannot_be_cancelled() {
        for status in ALL.into_iter().filter(|status| status.is_terminal()) {
            assert_eq!(
                status.apply(OrderTransition::Cancel),
                Err(InvalidTransition { current: status })
            );
        }
    }

    #[test]
    fn cancel_rejection_names_the_current_status() {
        let error = OrderStatus::Completed
            .apply(OrderTransition::Cancel)
            .err()
            .map(|error| error.to_string());

        assert_eq!(
            error.as_deref(),
            Some("Cannot cancel an order with status 'Completed'")
        );
    }

    #[test]
    fn admin_may_set_any_allowed_status_from_any_state() {
        for current in ALL {
            for target in [
                AdminStatus::Pending,
                AdminStatus::Processing,
                AdminStatus::Completed,
                AdminStatus::Declined,
            ] {
                assert_eq!(
                    current.apply(OrderTransition::AdminSet(target)),
                    Ok(OrderStatus::from(target))
                );
            }
        }
    }

    #[test]
    fn admin_cannot_assign_cancelled_or_unknown_statuses() {
        for value in ["Cancelled", "pending", "Shipped", ""] {
            assert!(
                value.parse::<AdminStatus>().is_err(),
                "{value:?} should not be assignable"
            );
        }
    }

    #[test]
    fn status_names_round_trip() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().ok(), Some(status));
        }
    }
}
