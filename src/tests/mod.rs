//! Tests for the crate-level record types.
//!
//! - `items`: BentoItem, NewItem and ItemPatch behaviour
//! - `errors`: StoreError display and conversions
