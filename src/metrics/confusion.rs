use std::collections::HashSet;

use nalgebra::{DMatrix, DVector};

use crate::{data::dataset::WholeNumber, errors::TreeError};

type ConfusionMatrix = DMatrix<usize>;

/// Evaluation helpers for anything that emits class labels.
pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix for true versus predicted labels.
    ///
    /// Classes are ordered ascending; rows index the true label, columns the
    /// predicted one.
    fn confusion_matrix(
        &self,
        y_true: &DVector<T>,
        y_pred: &DVector<T>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::DimensionMismatch(y_true.len(), y_pred.len()));
        }

        let mut classes_set = HashSet::<T>::new();
        classes_set.extend(y_true);
        classes_set.extend(y_pred);

        let mut classes = Vec::from_iter(classes_set);
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            let row = classes.iter().position(|class| class == y_t);
            let column = classes.iter().position(|class| class == y_p);
            if let (Some(row), Some(column)) = (row, column) {
                matrix[(row, column)] += 1;
            }
        }

        Ok(matrix)
    }

    /// Fraction of predictions matching the true labels.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;

        let mut correct = 0;
        matrix.diagonal().iter().for_each(|e| correct += e);

        Ok(correct as f64 / y_true.len() as f64)
    }
}
