//! Custom assertion helpers for domain types

use domain_dispatch::{BulkNotSent, BulkSent};
use domain_receipt::ActivityKind;

use crate::adapters::RecordingActivityLog;

/// Asserts the recorded event kinds match exactly, in order
pub fn assert_activity_kinds(log: &RecordingActivityLog, expected: &[ActivityKind]) {
    let kinds = log.kinds();
    assert_eq!(
        kinds, expected,
        "recorded activity {kinds:?} did not match expected {expected:?}"
    );
}

/// Asserts the sent list is sorted by receipt number
pub fn assert_sent_sorted(sent: &[BulkSent]) {
    let numbers: Vec<&str> = sent.iter().map(|s| s.receipt_number.as_str()).collect();
    let mut sorted = numbers.clone();
    sorted.sort();
    assert_eq!(numbers, sorted, "sent list not sorted by receipt number");
}

/// Asserts the not-sent list is sorted by receipt number (id fallback)
pub fn assert_not_sent_sorted(not_sent: &[BulkNotSent]) {
    let keys: Vec<String> = not_sent
        .iter()
        .map(|item| {
            item.receipt_number
                .clone()
                .unwrap_or_else(|| item.receipt_id.to_string())
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "not-sent list not sorted");
}
