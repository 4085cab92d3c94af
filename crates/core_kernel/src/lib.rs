//! Core Kernel - Foundational types and utilities for the receipt system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Clock abstraction and calendar helpers
//! - Indian-system amount-in-words rendering
//! - Port error types for the hexagonal architecture

pub mod money;
pub mod words;
pub mod clock;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use words::amount_in_words;
pub use clock::{Clock, SystemClock, month_start};
pub use identifiers::{OwnerId, ReceiptId, TenantId, AuditEventId};
pub use ports::{PortError, DomainPort};
