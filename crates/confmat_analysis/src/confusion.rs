//! Confusion matrix computation.

use std::fmt::Display;

use confmat_core::{check_pair, LabelDomain, Result};
use serde::{Deserialize, Serialize};

/// Confusion matrix for classification evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix<L> {
    /// The matrix values (row = true, col = pred).
    matrix: Vec<Vec<usize>>,
    /// Class labels in row/column order.
    labels: Vec<L>,
}

impl<L> ConfusionMatrix<L> {
    /// Class labels in row/column order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Count of observations with true class `row` predicted as class `col`.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.matrix.get(row).and_then(|r| r.get(col)).copied()
    }

    /// The matrix as rows of counts.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Number of observations per true class.
    pub fn row_sums(&self) -> Vec<usize> {
        self.matrix.iter().map(|row| row.iter().sum()).collect()
    }

    /// Number of observations per predicted class.
    pub fn col_sums(&self) -> Vec<usize> {
        (0..self.n_classes())
            .map(|j| self.matrix.iter().map(|row| row[j]).sum())
            .collect()
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Largest cell value.
    pub fn max_count(&self) -> usize {
        self.matrix.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Split into labels and rows.
    pub fn into_parts(self) -> (Vec<L>, Vec<Vec<usize>>) {
        (self.labels, self.matrix)
    }
}

impl<L: Display> ConfusionMatrix<L> {
    /// Get a text representation.
    pub fn to_string_table(&self) -> String {
        let names: Vec<String> = self.labels.iter().map(ToString::to_string).collect();
        let cell_width = names
            .iter()
            .map(|n| n.chars().count())
            .chain(self.matrix.iter().flatten().map(|v| v.to_string().len()))
            .max()
            .unwrap_or(1)
            .max(4)
            + 2;
        let head_width = names
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0)
            .max("true\\pred".len())
            + 1;

        let mut s = String::new();

        // Header
        s.push_str(&format!("{:<head_width$}", "true\\pred"));
        for name in &names {
            s.push_str(&format!("{:>cell_width$}", name));
        }
        s.push('\n');

        // Rows
        for (name, row) in names.iter().zip(&self.matrix) {
            s.push_str(&format!("{:<head_width$}", name));
            for value in row {
                s.push_str(&format!("{:>cell_width$}", value));
            }
            s.push('\n');
        }

        s
    }
}

/// Compute confusion matrix from true and predicted labels.
///
/// # Arguments
///
/// * `y_true` - Ground-truth labels
/// * `y_pred` - Predicted labels, paired with `y_true` by position
///
/// # Errors
///
/// `LengthMismatch` if the sequences differ in length, `EmptyInput` if both
/// are empty.
pub fn confusion_matrix<L: Ord + Clone>(y_true: &[L], y_pred: &[L]) -> Result<ConfusionMatrix<L>> {
    check_pair(y_true, y_pred)?;

    let domain = LabelDomain::from_pair(y_true, y_pred);
    let k = domain.len();
    let mut matrix = vec![vec![0usize; k]; k];

    for (t, p) in y_true.iter().zip(y_pred) {
        // Every label came from one of the two sequences, so both lookups hit.
        if let (Some(row), Some(col)) = (domain.index_of(t), domain.index_of(p)) {
            matrix[row][col] += 1;
        }
    }

    tracing::debug!(
        "Computed {}x{} confusion matrix from {} observations",
        k,
        k,
        y_true.len()
    );

    Ok(ConfusionMatrix {
        matrix,
        labels: domain.into_labels(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use confmat_core::CoreError;

    #[test]
    fn test_binary_scenario() {
        let y_true = vec![0, 1, 1, 0];
        let y_pred = vec![0, 1, 0, 0];

        let cm = confusion_matrix(&y_true, &y_pred).unwrap();

        assert_eq!(cm.labels(), &[0, 1]);
        assert_eq!(cm.rows(), &[vec![2, 0], vec![1, 1]]);

        let (labels, rows) = cm.into_parts();
        assert_eq!(labels, vec![0, 1]);
        assert_eq!(rows, vec![vec![2, 0], vec![1, 1]]);
    }

    #[test]
    fn test_string_labels() {
        let y_true = vec!["cat", "dog"];
        let y_pred = vec!["dog", "dog"];

        let cm = confusion_matrix(&y_true, &y_pred).unwrap();

        assert_eq!(cm.labels(), &["cat", "dog"]);
        assert_eq!(cm.rows(), &[vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_label_only_in_predictions() {
        let cm = confusion_matrix(&[1, 1], &[1, 5]).unwrap();
        assert_eq!(cm.labels(), &[1, 5]);
        assert_eq!(cm.get(0, 1), Some(1));
        assert_eq!(cm.get(1, 0), Some(0));
        assert_eq!(cm.get(2, 0), None);
        assert_eq!(cm.row_sums(), vec![2, 0]);
        assert_eq!(cm.col_sums(), vec![1, 1]);
    }

    #[test]
    fn test_perfect_predictions_are_diagonal() {
        let labels = vec![2, 0, 1, 2, 2, 0];
        let cm = confusion_matrix(&labels, &labels).unwrap();

        for i in 0..cm.n_classes() {
            for j in 0..cm.n_classes() {
                if i != j {
                    assert_eq!(cm.get(i, j), Some(0));
                }
            }
        }
        assert_eq!(cm.get(2, 2), Some(3));
        assert_eq!(cm.total(), 6);
        assert_eq!(cm.max_count(), 3);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let a = confusion_matrix(&["b", "a", "c"], &["c", "a", "b"]).unwrap();
        let b = confusion_matrix(&["c", "a", "b"], &["b", "a", "c"]).unwrap();
        assert_eq!(a.labels(), &["a", "b", "c"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            confusion_matrix(&[0, 1], &[0]),
            Err(CoreError::LengthMismatch {
                true_len: 2,
                pred_len: 1
            })
        ));
        assert!(matches!(
            confusion_matrix::<i32>(&[], &[]),
            Err(CoreError::EmptyInput)
        ));
    }

    #[test]
    fn test_string_table() {
        let cm = confusion_matrix(&["cat", "dog"], &["dog", "dog"]).unwrap();
        let table = cm.to_string_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("true\\pred"));
        assert!(lines[0].contains("cat") && lines[0].contains("dog"));
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            vec!["cat", "0", "1"]
        );
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            vec!["dog", "0", "1"]
        );
    }

    #[test]
    fn test_serialize() {
        let cm = confusion_matrix(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
        let json = serde_json::to_value(&cm).unwrap();
        assert_eq!(json["labels"], serde_json::json!([0, 1]));
        assert_eq!(json["matrix"], serde_json::json!([[2, 0], [1, 1]]));
    }
}
