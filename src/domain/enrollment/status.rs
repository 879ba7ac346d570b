//! Payment status state machine for enrollments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Checkout state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Checkout session created, learner not yet redirected back.
    Initiated,
    /// Provider reports the payment as in flight.
    Pending,
    /// Settled. The only status that opens course content.
    Paid,
    /// Checkout session lapsed without payment.
    Expired,
}

impl PaymentStatus {
    pub fn grants_access(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Initiated => "initiated",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Expired => "expired",
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Initiated, Pending)
                | (Initiated, Paid)
                | (Initiated, Expired)
                | (Pending, Paid)
                | (Pending, Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Initiated => vec![Pending, Paid, Expired],
            Pending => vec![Paid, Expired],
            Paid | Expired => vec![],
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiated" => Ok(PaymentStatus::Initiated),
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "expired" => Ok(PaymentStatus::Expired),
            other => Err(ValidationError::invalid_format(
                "payment_status",
                format!("unknown payment status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paid_grants_access() {
        assert!(PaymentStatus::Paid.grants_access());
        assert!(!PaymentStatus::Initiated.grants_access());
        assert!(!PaymentStatus::Pending.grants_access());
        assert!(!PaymentStatus::Expired.grants_access());
    }

    #[test]
    fn initiated_can_settle_directly() {
        let result = PaymentStatus::Initiated.transition_to(PaymentStatus::Paid);
        assert_eq!(result, Ok(PaymentStatus::Paid));
    }

    #[test]
    fn paid_cannot_expire() {
        assert!(PaymentStatus::Paid
            .transition_to(PaymentStatus::Expired)
            .is_err());
    }

    #[test]
    fn paid_and_expired_are_terminal() {
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Expired.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
    }

    #[test]
    fn status_parses_from_storage_form() {
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
