//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Where an order sits in the kitchen pipeline.
///
/// Statuses only move forward along `placed → preparing → ready → shipped →
/// delivered` (skipping stages is allowed). `cancelled` is reachable from any
/// non-terminal status. `delivered` and `cancelled` are terminal; nothing
/// leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Placed,
    Preparing,
    Ready,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Position along the forward chain. `Cancelled` sits outside the chain
    /// and is handled separately in [`Self::can_transition_to`].
    const fn rank(self) -> u8 {
        match self {
            Self::Placed => 0,
            Self::Preparing => 1,
            Self::Ready => 2,
            Self::Shipped => 3,
            Self::Delivered => 4,
            Self::Cancelled => 5,
        }
    }

    /// Whether no further transitions are allowed out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether an order may move from `self` to `next`.
    ///
    /// Moving to the same status counts as a rejected transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Cancelled => true,
            _ => next.rank() > self.rank(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed => write!(f, "placed"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placed" => Ok(Self::Placed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
