//! Receipt entity and charge model
//!
//! The `Receipt` is the central entity of the system: one record of a
//! rent/fee payment event, issued by an owner to a tenant. Identity fields
//! are immutable after creation; verification and dispatch each mutate only
//! their own field group.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, OwnerId, ReceiptId};

use crate::error::ReceiptError;

/// How the tenant paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    BankTransfer,
    Card,
    Cheque,
    Other,
}

impl PaymentMethod {
    /// Human-readable label for documents and email bodies
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Other => "Other",
        }
    }
}

/// Raw charge fields for one receipt
///
/// All fields default to zero; negative amounts are rejected by
/// [`ChargeSet::validate`] before any totals are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeSet {
    pub base_rent: Money,
    pub security_deposit: Money,
    pub electricity_charges: Money,
    pub water_charges: Money,
    pub other_charges: Money,
    pub previous_balance: Money,
}

impl ChargeSet {
    /// Creates an all-zero charge set in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            base_rent: Money::zero(currency),
            security_deposit: Money::zero(currency),
            electricity_charges: Money::zero(currency),
            water_charges: Money::zero(currency),
            other_charges: Money::zero(currency),
            previous_balance: Money::zero(currency),
        }
    }

    /// Sets the base rent
    pub fn with_base_rent(mut self, amount: Money) -> Self {
        self.base_rent = amount;
        self
    }

    /// Sets the security deposit
    pub fn with_security_deposit(mut self, amount: Money) -> Self {
        self.security_deposit = amount;
        self
    }

    /// Sets the electricity charges
    pub fn with_electricity(mut self, amount: Money) -> Self {
        self.electricity_charges = amount;
        self
    }

    /// Sets the water charges
    pub fn with_water(mut self, amount: Money) -> Self {
        self.water_charges = amount;
        self
    }

    /// Sets the other charges
    pub fn with_other(mut self, amount: Money) -> Self {
        self.other_charges = amount;
        self
    }

    /// Sets the balance carried forward from earlier periods
    pub fn with_previous_balance(mut self, amount: Money) -> Self {
        self.previous_balance = amount;
        self
    }

    /// Rejects negative charges, naming the offending field
    pub fn validate(&self) -> Result<(), ReceiptError> {
        for (field, money) in self.fields() {
            if money.is_negative() {
                return Err(ReceiptError::InvalidAmount {
                    field,
                    amount: money.amount(),
                });
            }
        }
        Ok(())
    }

    /// The charge fields in a stable order, paired with their names
    pub fn fields(&self) -> [(&'static str, Money); 6] {
        [
            ("base_rent", self.base_rent),
            ("security_deposit", self.security_deposit),
            ("electricity_charges", self.electricity_charges),
            ("water_charges", self.water_charges),
            ("other_charges", self.other_charges),
            ("previous_balance", self.previous_balance),
        ]
    }
}

/// Request to issue a new receipt
///
/// Totals are never accepted from the caller; they are recomputed from the
/// charge fields on every issuance.
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub owner_id: OwnerId,
    pub tenant_name: String,
    pub tenant_email: Option<String>,
    pub room_number: Option<String>,
    /// Billing period label, e.g. "August 2025"
    pub period: String,
    pub charges: ChargeSet,
    /// Amount actually received; defaults to the computed total
    pub amount_paid: Option<Money>,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}

/// A payment receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier
    pub id: ReceiptId,
    /// Human-readable number, `PG<year><month2><seq4>`, globally unique
    pub receipt_number: String,
    /// Opaque public verification token, generated once, immutable
    pub verification_token: String,
    /// Issuing owner; the exclusive writer of this record
    pub owner_id: OwnerId,

    // Tenant block
    pub tenant_name: String,
    pub tenant_email: Option<String>,
    pub room_number: Option<String>,
    pub period: String,

    // Financial fields
    pub charges: ChargeSet,
    pub total_amount: Money,
    pub amount_paid: Money,
    pub balance_due: Money,
    pub amount_in_words: String,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,

    // Verification state
    pub verification_count: u64,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub is_verified: bool,

    // Dispatch state
    pub sent_via_email: bool,
    pub email_sent_at: Option<DateTime<Utc>>,
    pub last_email_recipient: Option<String>,
    pub email_message_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Receipt {
    /// Returns true if this receipt was emailed less than `cooldown` ago
    pub fn within_cooldown(&self, now: DateTime<Utc>, cooldown: chrono::Duration) -> bool {
        match self.email_sent_at {
            Some(sent_at) => now - sent_at < cooldown,
            None => false,
        }
    }
}
