//! # confmat_core
//!
//! Core types shared by the confmat crates.
//!
//! This crate provides:
//! - [`CoreError`] and the [`Result`] alias used by the computation layer
//! - [`LabelDomain`], the sorted set of distinct labels observed in a pair of
//!   label sequences
//!
//! ## Example
//!
//! ```rust
//! use confmat_core::LabelDomain;
//!
//! let domain = LabelDomain::from_pair(&["dog", "cat"], &["dog", "bird"]);
//! assert_eq!(domain.labels(), &["bird", "cat", "dog"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod labels;

pub use error::{CoreError, Result};
pub use labels::{check_pair, LabelDomain};
