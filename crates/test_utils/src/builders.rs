//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::NaiveDate;
use core_kernel::{Money, OwnerId};
use domain_receipt::{ChargeSet, NewReceipt, PaymentMethod};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

use crate::fixtures::ChargeFixtures;

/// Builder for issuance requests
pub struct NewReceiptBuilder {
    owner_id: OwnerId,
    tenant_name: String,
    tenant_email: Option<String>,
    room_number: Option<String>,
    period: String,
    charges: ChargeSet,
    amount_paid: Option<Money>,
    payment_method: PaymentMethod,
    payment_date: NaiveDate,
    notes: Option<String>,
}

impl Default for NewReceiptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewReceiptBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            owner_id: OwnerId::new(),
            tenant_name: "Asha Rao".to_string(),
            tenant_email: Some("asha.rao@example.com".to_string()),
            room_number: Some("A-101".to_string()),
            period: "August 2025".to_string(),
            charges: ChargeFixtures::standard(),
            amount_paid: None,
            payment_method: PaymentMethod::Upi,
            payment_date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            notes: None,
        }
    }

    /// Creates a builder with a randomized tenant
    pub fn random_tenant() -> Self {
        let mut builder = Self::new();
        builder.tenant_name = Name().fake();
        builder.tenant_email = Some(SafeEmail().fake());
        builder
    }

    /// Sets the owner
    pub fn with_owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Sets the tenant name
    pub fn with_tenant_name(mut self, name: impl Into<String>) -> Self {
        self.tenant_name = name.into();
        self
    }

    /// Sets the tenant email
    pub fn with_tenant_email(mut self, email: impl Into<String>) -> Self {
        self.tenant_email = Some(email.into());
        self
    }

    /// Clears the tenant email
    pub fn without_tenant_email(mut self) -> Self {
        self.tenant_email = None;
        self
    }

    /// Sets the room number
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room_number = Some(room.into());
        self
    }

    /// Sets the billing period label
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    /// Sets the charge fields
    pub fn with_charges(mut self, charges: ChargeSet) -> Self {
        self.charges = charges;
        self
    }

    /// Sets the explicit amount paid
    pub fn with_amount_paid(mut self, amount: Money) -> Self {
        self.amount_paid = Some(amount);
        self
    }

    /// Sets the payment method
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Sets the payment date
    pub fn with_payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = date;
        self
    }

    /// Sets the free-form notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the issuance request
    pub fn build(self) -> NewReceipt {
        NewReceipt {
            owner_id: self.owner_id,
            tenant_name: self.tenant_name,
            tenant_email: self.tenant_email,
            room_number: self.room_number,
            period: self.period,
            charges: self.charges,
            amount_paid: self.amount_paid,
            payment_method: self.payment_method,
            payment_date: self.payment_date,
            notes: self.notes,
        }
    }
}
