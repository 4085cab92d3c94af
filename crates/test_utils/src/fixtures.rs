//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the receipt system.
//! Fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{Currency, Money, OwnerId};
use domain_dispatch::OwnerProfile;
use domain_receipt::ChargeSet;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical monthly rent
    pub fn rent_5000() -> Money {
        Money::inr(dec!(5000.00))
    }

    /// A typical security deposit
    pub fn deposit_2000() -> Money {
        Money::inr(dec!(2000.00))
    }

    /// A zero rupee amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Mid-month issuance instant (2025-08-15 10:00 UTC)
    pub fn mid_august() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 15, 10, 0, 0).unwrap()
    }

    /// First instant of the following month
    pub fn september_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
    }
}

/// Fixture for charge data
pub struct ChargeFixtures;

impl ChargeFixtures {
    /// Rent + deposit + utilities totalling 7600.00
    pub fn standard() -> ChargeSet {
        ChargeSet::zero(Currency::INR)
            .with_base_rent(MoneyFixtures::rent_5000())
            .with_security_deposit(MoneyFixtures::deposit_2000())
            .with_electricity(Money::inr(dec!(450.50)))
            .with_water(Money::inr(dec!(120.00)))
            .with_other(Money::inr(dec!(29.50)))
    }

    /// Rent only, totalling 5000.00
    pub fn rent_only() -> ChargeSet {
        ChargeSet::zero(Currency::INR).with_base_rent(MoneyFixtures::rent_5000())
    }
}

/// Fixture for owner profiles
pub struct OwnerFixtures;

impl OwnerFixtures {
    /// A standard owner profile with a fresh id
    pub fn sharma_pg() -> OwnerProfile {
        OwnerProfile {
            id: OwnerId::new(),
            display_name: "R. Sharma".to_string(),
            property_name: "Sharma PG".to_string(),
            email: "owner@sharma-pg.example".to_string(),
            phone: Some("+91-98765-43210".to_string()),
            address: Some("12 MG Road, Pune".to_string()),
        }
    }

    /// An owner profile bound to an existing id
    pub fn for_owner(id: OwnerId) -> OwnerProfile {
        let mut profile = Self::sharma_pg();
        profile.id = id;
        profile
    }
}
