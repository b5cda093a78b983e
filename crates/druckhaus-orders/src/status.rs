// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Order status transitions.
//
// The expected progression is pending → printing → shipped → delivered,
// but operators routinely walk an order backwards to correct a mistake
// (a parcel bounced, a job was marked shipped too early). The *values*
// are therefore a closed enum while the *transition graph* stays open:
// any known status may follow any other.

use druckhaus_core::OrderStatus;
use druckhaus_core::error::Result;
use tracing::warn;

/// Position of a status in the expected progression.
fn rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::Pending => 0,
        OrderStatus::Printing => 1,
        OrderStatus::Shipped => 2,
        OrderStatus::Delivered => 3,
    }
}

/// Whether `to` keeps the order at its place in the expected progression
/// or moves it forward.
pub fn is_forward(from: OrderStatus, to: OrderStatus) -> bool {
    rank(to) >= rank(from)
}

/// Validate a requested status transition.
///
/// Every pair of known statuses is accepted; a non-forward move is logged
/// so unusual corrections show up in the operator log. The only failure
/// mode around status updates is an unknown order id, which the store
/// signals separately.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<()> {
    if !is_forward(from, to) {
        warn!(%from, %to, "order status moved backwards");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Printing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    #[test]
    fn expected_progression_is_forward() {
        assert!(is_forward(OrderStatus::Pending, OrderStatus::Printing));
        assert!(is_forward(OrderStatus::Printing, OrderStatus::Shipped));
        assert!(is_forward(OrderStatus::Shipped, OrderStatus::Delivered));
    }

    #[test]
    fn skipping_ahead_is_forward() {
        assert!(is_forward(OrderStatus::Pending, OrderStatus::Delivered));
    }

    #[test]
    fn walking_back_is_not_forward() {
        assert!(!is_forward(OrderStatus::Delivered, OrderStatus::Pending));
        assert!(!is_forward(OrderStatus::Shipped, OrderStatus::Printing));
    }

    #[test]
    fn every_transition_is_accepted() {
        // Free-form assignment between known statuses, including
        // delivered → pending, is deliberate.
        for from in ALL {
            for to in ALL {
                assert!(validate_transition(from, to).is_ok());
            }
        }
    }

    #[test]
    fn only_delivered_is_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Printing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }
}
