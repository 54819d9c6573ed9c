//! Payment entity and settlement arithmetic

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    EWallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Card => "CARD",
            Self::BankTransfer => "BANK_TRANSFER",
            Self::EWallet => "E_WALLET",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "CARD" => Ok(Self::Card),
            "BANK_TRANSFER" => Ok(Self::BankTransfer),
            "E_WALLET" => Ok(Self::EWallet),
            other => Err(DomainError::Validation(format!(
                "Unknown payment method: {}",
                other
            ))),
        }
    }
}

/// One payment for a device. At most one exists per device.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub total: i64,
    pub discount: i64,
    /// Always `total - discount`, never negative
    pub final_amount: i64,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Build an unsaved transaction. `final_amount` is left at zero until
    /// [`settle`](Self::settle) runs.
    pub fn new(device_id: i32, total: i64, discount: i64, payment_method: PaymentMethod) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            device_id,
            repair_session_id: None,
            total,
            discount,
            final_amount: 0,
            payment_method,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute `final_amount` from `total` and `discount`.
    pub fn settle(&mut self) -> DomainResult<()> {
        self.final_amount = final_amount(self.total, self.discount)?;
        Ok(())
    }
}

/// `total - discount`, rejecting negative inputs and a negative result.
pub fn final_amount(total: i64, discount: i64) -> DomainResult<i64> {
    if total < 0 || discount < 0 {
        return Err(DomainError::Validation(
            "total and discount must not be negative".into(),
        ));
    }
    let amount = total - discount;
    if amount < 0 {
        return Err(DomainError::InvalidState(format!(
            "Final amount must not be negative (total={}, discount={})",
            total, discount
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_amount_is_total_minus_discount() {
        assert_eq!(final_amount(500_000, 50_000).unwrap(), 450_000);
        assert_eq!(final_amount(500_000, 500_000).unwrap(), 0);
    }

    #[test]
    fn discount_above_total_is_rejected() {
        let err = final_amount(500_000, 600_000).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[test]
    fn settle_updates_final_amount() {
        let mut tx = Transaction::new(3, 120_000, 20_000, PaymentMethod::Card);
        tx.settle().unwrap();
        assert_eq!(tx.final_amount, 100_000);
    }

    #[test]
    fn payment_method_parses() {
        assert_eq!("bank_transfer".parse::<PaymentMethod>().unwrap(), PaymentMethod::BankTransfer);
        assert!("CHEQUE".parse::<PaymentMethod>().is_err());
    }
}
