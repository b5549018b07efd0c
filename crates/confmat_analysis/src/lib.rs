//! # confmat_analysis
//!
//! Confusion matrix computation for confmat.
//!
//! Rows and columns follow the ascending order of the distinct labels found in
//! either input sequence; the caller never supplies the class list.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod confusion;

pub use confusion::{confusion_matrix, ConfusionMatrix};
