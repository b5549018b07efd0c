//! Label domains inferred from observed labels.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Validate that a pair of label sequences can be compared position by position.
///
/// Length is checked before emptiness, so `([], [x])` reports a mismatch.
pub fn check_pair<L>(y_true: &[L], y_pred: &[L]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(CoreError::LengthMismatch {
            true_len: y_true.len(),
            pred_len: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    Ok(())
}

/// Sorted set of distinct labels, used as the row and column order of a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDomain<L> {
    labels: Vec<L>,
}

impl<L: Ord + Clone> LabelDomain<L> {
    /// Build the domain from the union of both sequences, ascending.
    pub fn from_pair(y_true: &[L], y_pred: &[L]) -> Self {
        let set: BTreeSet<&L> = y_true.iter().chain(y_pred).collect();
        Self {
            labels: set.into_iter().cloned().collect(),
        }
    }

    /// Position of `label` in the domain, if present.
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.binary_search(label).ok()
    }
}

impl<L> LabelDomain<L> {
    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the domain has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Consume the domain, returning the sorted labels.
    pub fn into_labels(self) -> Vec<L> {
        self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_is_sorted_union() {
        let domain = LabelDomain::from_pair(&[3, 1, 3], &[2, 1, 7]);
        assert_eq!(domain.labels(), &[1, 2, 3, 7]);
        assert_eq!(domain.len(), 4);
        assert_eq!(domain.index_of(&7), Some(3));
        assert_eq!(domain.index_of(&5), None);
    }

    #[test]
    fn test_domain_not_fixed_to_ten_classes() {
        let domain = LabelDomain::from_pair(&[0, 42], &[42, 42]);
        assert_eq!(domain.labels(), &[0, 42]);
    }

    #[test]
    fn test_check_pair() {
        assert!(check_pair(&[1, 2], &[2, 1]).is_ok());
        assert!(matches!(
            check_pair(&[1, 2, 3], &[1]),
            Err(CoreError::LengthMismatch {
                true_len: 3,
                pred_len: 1
            })
        ));
        assert!(matches!(check_pair::<u8>(&[], &[]), Err(CoreError::EmptyInput)));
        assert!(matches!(
            check_pair(&[], &["a"]),
            Err(CoreError::LengthMismatch { .. })
        ));
    }
}
