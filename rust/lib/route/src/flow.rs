//! Navigation out of the reservation confirmation view.

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;
use crate::navigator::Navigator;
use crate::path;
use crate::selector::Resolution;

/// Buttons offered once a reservation has been placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationAction {
    /// "View my reservations".
    ViewReservations,
    /// "Continue booking".
    ContinueBooking,
}

impl ConfirmationAction {
    pub fn target(&self) -> &'static str {
        match self {
            ConfirmationAction::ViewReservations => path::RESERVATIONS,
            ConfirmationAction::ContinueBooking => path::RENTALS,
        }
    }
}

impl FromStr for ConfirmationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view-reservations" => Ok(ConfirmationAction::ViewReservations),
            "continue-booking" => Ok(ConfirmationAction::ContinueBooking),
            other => Err(format!(
                "unknown action '{}', expected view-reservations or continue-booking",
                other
            )),
        }
    }
}

impl fmt::Display for ConfirmationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationAction::ViewReservations => f.write_str("view-reservations"),
            ConfirmationAction::ContinueBooking => f.write_str("continue-booking"),
        }
    }
}

/// State of the confirmation view after a reservation was placed.
///
/// The reservation may still be unknown (the booking call has not returned
/// yet); the view then shows an empty order number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationConfirmation {
    pub reservation_id: Option<i64>,
}

impl ReservationConfirmation {
    pub fn new(reservation_id: Option<i64>) -> Self {
        Self { reservation_id }
    }

    pub fn order_label(&self) -> String {
        match self.reservation_id {
            Some(id) => format!("Order #: {}", id),
            None => "Order #:".to_string(),
        }
    }

    /// Navigate to the action's target through the gate.
    pub fn follow(
        &self,
        action: ConfirmationAction,
        navigator: &Navigator<'_>,
    ) -> Result<Resolution, RouteError> {
        navigator.resolve(action.target())
    }
}
