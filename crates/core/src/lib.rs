//! Core business logic for Voltra.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The account/card lifecycle rules, transition tables, and validation
//! predicates all live here.
//!
//! # Modules
//!
//! - `lifecycle` - Account and card status state machines

pub mod lifecycle;
