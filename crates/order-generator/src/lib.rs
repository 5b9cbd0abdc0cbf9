//! Synthetic order records for the orders load generator.
//!
//! This crate provides the `OrderGenerator` which produces one random
//! `OrderRecord` per call. A fixed share of records (90% by default) takes the
//! *privileged* branch, where the dealer code, source id, management code and
//! action code are all pinned to known constants so that downstream consumers
//! have a predictable subset to filter on. Every other record is drawn field by
//! field from its domain.
//!
//! # Architecture
//!
//! ```text
//!        seed / entropy
//!              │
//!              ▼
//!   ┌──────────────────────┐
//!   │    OrderGenerator    │
//!   │                      │
//!   │  - rng (StdRng)      │
//!   │  - privileged_ratio  │
//!   └──────────┬───────────┘
//!              │  p > 1 - ratio ? privileged : generic
//!              ▼
//!   OrderRecord { ORDERKEY, CORRELIDHEX, ..., MESSAGEPAYLOAD }
//! ```
//!
//! # Example
//!
//! ```rust
//! use order_generator::OrderGenerator;
//!
//! let mut generator = OrderGenerator::new(42);
//! let record = generator.next_record();
//! assert!(record.order_key.starts_with("ORD-"));
//! ```

pub mod generator;
pub mod generators;
pub mod record;

// Re-exports for convenience
pub use generator::{OrderGenerator, OrderRecordIterator, DEFAULT_PRIVILEGED_RATIO};
pub use generators::payload::{Payload, PayloadKind};
pub use record::{Branch, OrderRecord};
