//! Indian-system amount-in-words rendering
//!
//! Converts a decimal rupee amount into the English phrase printed on
//! receipts, using the Indian grouping (thousand, lakh, crore) rather than
//! the Western thousand/million/billion scale. The conversion is pure
//! table-driven arithmetic over the digits.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Renders an amount as rupees-and-paise words, e.g.
/// `One Thousand Five Hundred Rupees Only` or
/// `One Lakh Rupees and Fifty Paise Only`.
///
/// The fractional clause appears only when the paise part is non-zero.
/// Negative inputs render their absolute value; the sign carries no meaning
/// on a printed receipt. Rupee parts beyond `u64::MAX` fall back to a plain
/// digits rendering.
pub fn amount_in_words(amount: Decimal) -> String {
    let amount = amount.abs().round_dp(2);
    let whole = amount.trunc();
    let rupees = match whole.to_u64() {
        Some(rupees) => rupees,
        // Amounts past u64 rupees fall back to a digits rendering
        None => return format!("{} Rupees Only", whole),
    };
    let paise = ((amount - whole) * Decimal::from(100)).to_u64().unwrap_or(0);

    let rupee_words = integer_words(rupees);

    if paise == 0 {
        format!("{} Rupees Only", rupee_words)
    } else {
        format!("{} Rupees and {} Paise Only", rupee_words, integer_words(paise))
    }
}

/// Renders a non-negative integer in the Indian numbering system.
///
/// Groups from most significant: crore (10^7, recursing for amounts of
/// 100 crore and above), lakh (10^5), thousand (10^3), then hundreds and
/// the final two digits.
fn integer_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut n = n;

    if n >= 1_00_00_000 {
        parts.push(format!("{} Crore", integer_words(n / 1_00_00_000)));
        n %= 1_00_00_000;
    }

    let lakhs = n / 1_00_000;
    if lakhs > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakhs)));
        n %= 1_00_000;
    }

    let thousands = n / 1_000;
    if thousands > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousands)));
        n %= 1_000;
    }

    let hundreds = n / 100;
    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds as usize]));
        n %= 100;
    }

    if n > 0 {
        parts.push(below_hundred(n));
    }

    parts.join(" ")
}

/// Words for 1..=99 from the ones/teens/tens tables.
fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero() {
        assert_eq!(amount_in_words(dec!(0)), "Zero Rupees Only");
    }

    #[test]
    fn test_single_digits_and_teens() {
        assert_eq!(amount_in_words(dec!(7)), "Seven Rupees Only");
        assert_eq!(amount_in_words(dec!(14)), "Fourteen Rupees Only");
        assert_eq!(amount_in_words(dec!(19)), "Nineteen Rupees Only");
    }

    #[test]
    fn test_tens() {
        assert_eq!(amount_in_words(dec!(40)), "Forty Rupees Only");
        assert_eq!(amount_in_words(dec!(99)), "Ninety Nine Rupees Only");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(amount_in_words(dec!(100)), "One Hundred Rupees Only");
        assert_eq!(amount_in_words(dec!(250)), "Two Hundred Fifty Rupees Only");
    }

    #[test]
    fn test_one_thousand_five_hundred() {
        assert_eq!(
            amount_in_words(dec!(1500)),
            "One Thousand Five Hundred Rupees Only"
        );
    }

    #[test]
    fn test_lakh_with_paise() {
        assert_eq!(
            amount_in_words(dec!(100000.50)),
            "One Lakh Rupees and Fifty Paise Only"
        );
    }

    #[test]
    fn test_crore() {
        assert_eq!(
            amount_in_words(dec!(12345678)),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight Rupees Only"
        );
    }

    #[test]
    fn test_hundred_crore_recursion() {
        assert_eq!(
            amount_in_words(dec!(2500000000)),
            "Two Hundred Fifty Crore Rupees Only"
        );
    }

    #[test]
    fn test_zero_rupees_with_paise() {
        assert_eq!(
            amount_in_words(dec!(0.05)),
            "Zero Rupees and Five Paise Only"
        );
    }

    #[test]
    fn test_paise_rounding() {
        assert_eq!(
            amount_in_words(dec!(10.999)),
            "Eleven Rupees Only"
        );
    }

    #[test]
    fn test_beyond_words_range_renders_digits() {
        // One short of 10^20 rupees, more than u64 can hold
        assert_eq!(
            amount_in_words(dec!(99999999999999999999)),
            "99999999999999999999 Rupees Only"
        );
    }

    #[test]
    fn test_negative_uses_absolute_value() {
        assert_eq!(amount_in_words(dec!(-1500)), "One Thousand Five Hundred Rupees Only");
    }
}
