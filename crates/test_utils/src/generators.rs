//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use core_kernel::{Currency, Money};
use domain_receipt::ChargeSet;
use proptest::prelude::*;

/// Strategy for non-negative INR amounts in paise
pub fn charge_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..100_000_000i64
}

/// Strategy for non-negative INR Money values
pub fn charge_money_strategy() -> impl Strategy<Value = Money> {
    charge_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for INR Money values that may be negative
pub fn signed_money_strategy() -> impl Strategy<Value = Money> {
    (-100_000_000i64..100_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for complete valid charge sets
pub fn charge_set_strategy() -> impl Strategy<Value = ChargeSet> {
    (
        charge_money_strategy(),
        charge_money_strategy(),
        charge_money_strategy(),
        charge_money_strategy(),
        charge_money_strategy(),
        charge_money_strategy(),
    )
        .prop_map(|(rent, deposit, electricity, water, other, previous)| ChargeSet {
            base_rent: rent,
            security_deposit: deposit,
            electricity_charges: electricity,
            water_charges: water,
            other_charges: other,
            previous_balance: previous,
        })
}
