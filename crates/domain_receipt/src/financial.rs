//! Financial Calculator
//!
//! Pure computation of receipt totals from raw charge fields. No I/O: the
//! issuance service calls this before touching the store, so validation
//! failures surface before any side effect.

use core_kernel::{amount_in_words, Money};

use crate::error::ReceiptError;
use crate::receipt::ChargeSet;

/// Derived financial fields of a receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptTotals {
    /// Sum of the five charge fields (previous balance excluded)
    pub total_amount: Money,
    /// Amount actually received; defaults to `total_amount`
    pub amount_paid: Money,
    /// `total_amount + previous_balance - amount_paid`; negative on overpayment
    pub balance_due: Money,
    /// Indian-system words rendering of `amount_paid`
    pub amount_in_words: String,
}

/// Computes totals, balance due, and the amount-in-words line.
///
/// Charges must be non-negative; `amount_paid` when supplied must be
/// non-negative too ("fully paid" is the implicit default). Overpayment
/// produces a negative balance, which is preserved exactly.
pub fn compute(charges: &ChargeSet, amount_paid: Option<Money>) -> Result<ReceiptTotals, ReceiptError> {
    charges.validate()?;

    let total_amount = charges
        .base_rent
        .checked_add(&charges.security_deposit)?
        .checked_add(&charges.electricity_charges)?
        .checked_add(&charges.water_charges)?
        .checked_add(&charges.other_charges)?;

    let amount_paid = match amount_paid {
        Some(paid) if paid.is_negative() => {
            return Err(ReceiptError::InvalidAmount {
                field: "amount_paid",
                amount: paid.amount(),
            });
        }
        Some(paid) => paid,
        None => total_amount,
    };

    let balance_due = total_amount
        .checked_add(&charges.previous_balance)?
        .checked_sub(&amount_paid)?;

    Ok(ReceiptTotals {
        total_amount,
        amount_paid,
        balance_due,
        amount_in_words: amount_in_words(amount_paid.amount()),
    })
}
