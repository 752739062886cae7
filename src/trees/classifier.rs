//! Decision Tree Classifier
use super::{node::TreeNode, params::TreeParams};
use crate::{
    data::dataset::{Dataset, Number, WholeNumber},
    errors::TreeError,
    metrics::confusion::ClassificationMetrics,
};
use nalgebra::{DMatrix, DVector};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Candidate split: the tested column, a literal threshold drawn from a row,
/// and the resulting row partition.
pub struct SplitData<XT: Number, YT: WholeNumber> {
    pub feature_index: usize,
    pub threshold: XT,
    pub left: Dataset<XT, YT>,
    pub right: Dataset<XT, YT>,
}

/// Weighted Gini impurity of a two-way row partition against a fixed class
/// set.
///
/// Each group contributes `1 - sum(p_class^2)` weighted by its share of the
/// total row count. Empty groups are skipped and classes absent from a group
/// have probability zero. `0.0` means every group is pure; uniform mixing of
/// `k` classes approaches `1 - 1/k`.
pub fn gini_index<YT: WholeNumber>(groups: [&DVector<YT>; 2], classes: &[YT]) -> f64 {
    let n_instances = groups.iter().map(|group| group.len()).sum::<usize>() as f64;

    let mut gini = 0.0;
    for group in groups {
        if group.is_empty() {
            continue;
        }
        let size = group.len() as f64;
        let mut score = 0.0;
        for class in classes {
            let p = group.iter().filter(|&label| label == class).count() as f64 / size;
            score += p * p;
        }
        gini += (1.0 - score) * (size / n_instances);
    }
    gini
}

/// Most frequent label; ties go to whichever tied label appears first in the
/// slice.
fn majority_label<YT: WholeNumber>(labels: &[YT]) -> Option<YT> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(*label).or_insert(0usize) += 1;
    }

    let mut majority: Option<(YT, usize)> = None;
    for label in labels {
        let count = counts[label];
        if majority.map_or(true, |(_, best)| count > best) {
            majority = Some((*label, count));
        }
    }
    majority.map(|(label, _)| label)
}

/// Binary decision tree classifier grown with exhaustive CART Gini splitting.
///
/// The tree is built once by [`fit`](DecisionTreeClassifier::fit) and is
/// immutable afterwards; prediction and rendering only read it.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: Number, YT: WholeNumber> {
    root: Option<Box<TreeNode<XT, YT>>>,
    tree_params: TreeParams,
    classes: Vec<YT>,
}

impl<XT: Number, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    pub fn new() -> Self {
        Self {
            root: None,
            tree_params: TreeParams::new(),
            classes: Vec::new(),
        }
    }

    /// Creates a classifier with custom growth limits.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_depth` or `min_size` is zero.
    pub fn with_params(max_depth: Option<u16>, min_size: Option<usize>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        if let Some(max_depth) = max_depth {
            tree.set_max_depth(max_depth)?;
        }
        if let Some(min_size) = min_size {
            tree.set_min_size(min_size)?;
        }
        Ok(tree)
    }

    pub fn set_max_depth(&mut self, max_depth: u16) -> Result<(), TreeError> {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn set_min_size(&mut self, min_size: usize) -> Result<(), TreeError> {
        self.tree_params.set_min_size(min_size)
    }

    pub fn max_depth(&self) -> u16 {
        self.tree_params.max_depth()
    }

    pub fn min_size(&self) -> usize {
        self.tree_params.min_size()
    }

    /// Distinct labels observed at fit time, in first-occurrence order.
    pub fn classes(&self) -> &[YT] {
        &self.classes
    }

    /// Root of the fitted tree, if any.
    pub fn root(&self) -> Option<&TreeNode<XT, YT>> {
        self.root.as_deref()
    }

    /// Builds the tree from labeled rows.
    ///
    /// The class set is computed once here and scored against at every node,
    /// even where a branch no longer contains all classes.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if rows and labels disagree in length,
    /// `EmptyDataset` if there are no rows to learn from.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>) -> Result<(), TreeError> {
        if dataset.x.nrows() != dataset.y.len() {
            return Err(TreeError::DimensionMismatch(
                dataset.x.nrows(),
                dataset.y.len(),
            ));
        }
        if !dataset.is_not_empty() {
            return Err(TreeError::EmptyDataset);
        }

        let mut classes = Vec::new();
        for label in dataset.y.iter() {
            if !classes.contains(label) {
                classes.push(*label);
            }
        }
        self.classes = classes;

        let root_split = self.get_split(dataset).ok_or(TreeError::EmptyDataset)?;
        let root = self.grow(root_split, 1)?;
        self.root = Some(Box::new(root));
        Ok(())
    }

    /// Classifies each row of `features` independently, preserving row order.
    ///
    /// Rows are walked in parallel; the fitted tree is read-only.
    ///
    /// # Errors
    ///
    /// `NotFitted` before [`fit`](DecisionTreeClassifier::fit),
    /// `MissingFeature` if a row lacks a tested column, `TypeMismatch` if a
    /// value cannot be ordered against a threshold.
    pub fn predict(&self, features: &DMatrix<XT>) -> Result<DVector<YT>, TreeError> {
        let root = self.root.as_deref().ok_or(TreeError::NotFitted)?;

        let rows = features
            .row_iter()
            .map(|row| row.transpose())
            .collect::<Vec<_>>();
        let predictions = rows
            .into_par_iter()
            .map(|row| Self::predict_row(&row, root))
            .collect::<Result<Vec<_>, TreeError>>()?;

        Ok(DVector::from_vec(predictions))
    }

    /// Lines describing the fitted tree, for inspection only.
    pub fn render(&self) -> Result<Vec<String>, TreeError> {
        let root = self.root.as_deref().ok_or(TreeError::NotFitted)?;
        let mut lines = Vec::new();
        root.render_into(0, &mut lines);
        Ok(lines)
    }

    fn predict_row(features: &DVector<XT>, node: &TreeNode<XT, YT>) -> Result<YT, TreeError> {
        match node {
            TreeNode::Leaf { label } => Ok(*label),
            TreeNode::Decision {
                feature_index,
                threshold,
                left,
                right,
            } => {
                let value = features
                    .get(*feature_index)
                    .ok_or(TreeError::MissingFeature(*feature_index))?;
                match value.partial_cmp(threshold) {
                    Some(Ordering::Less) => Self::predict_row(features, left),
                    Some(_) => Self::predict_row(features, right),
                    None => Err(TreeError::TypeMismatch(*feature_index)),
                }
            }
        }
    }

    /// Exhaustive best-split search: every observed value of every column is
    /// a candidate threshold, visited in column-then-row order. Only a
    /// strictly lower impurity replaces the incumbent, so ties keep the
    /// first-encountered candidate. Quadratic in rows per call.
    fn get_split(&self, dataset: &Dataset<XT, YT>) -> Option<SplitData<XT, YT>> {
        let mut best_split: Option<SplitData<XT, YT>> = None;
        let mut best_score = f64::INFINITY;

        for feature_index in 0..dataset.x.ncols() {
            for row in dataset.x.row_iter() {
                let threshold = row[feature_index];
                let (left, right) = dataset.split_on_threshold(feature_index, threshold);
                let score = gini_index([&left.y, &right.y], &self.classes);
                if score < best_score {
                    best_score = score;
                    best_split = Some(SplitData {
                        feature_index,
                        threshold,
                        left,
                        right,
                    });
                }
            }
        }
        best_split
    }

    fn grow(&self, split: SplitData<XT, YT>, depth: u16) -> Result<TreeNode<XT, YT>, TreeError> {
        let SplitData {
            feature_index,
            threshold,
            left,
            right,
        } = split;

        // A threshold that separated nothing closes both branches with one
        // leaf over the union of the groups.
        if !left.is_not_empty() || !right.is_not_empty() {
            let union = left
                .y
                .iter()
                .chain(right.y.iter())
                .copied()
                .collect::<Vec<_>>();
            let leaf = Self::to_terminal(&union)?;
            return Ok(TreeNode::Decision {
                feature_index,
                threshold,
                left: Box::new(leaf.clone()),
                right: Box::new(leaf),
            });
        }

        if depth >= self.max_depth() {
            return Ok(TreeNode::decision(
                feature_index,
                threshold,
                Self::to_terminal(left.y.as_slice())?,
                Self::to_terminal(right.y.as_slice())?,
            ));
        }

        let left_node = self.grow_side(left, depth)?;
        let right_node = self.grow_side(right, depth)?;
        Ok(TreeNode::decision(
            feature_index,
            threshold,
            left_node,
            right_node,
        ))
    }

    fn grow_side(
        &self,
        group: Dataset<XT, YT>,
        depth: u16,
    ) -> Result<TreeNode<XT, YT>, TreeError> {
        if group.nrows() <= self.min_size() {
            return Self::to_terminal(group.y.as_slice());
        }
        match self.get_split(&group) {
            Some(split) => self.grow(split, depth + 1),
            None => Self::to_terminal(group.y.as_slice()),
        }
    }

    fn to_terminal(labels: &[YT]) -> Result<TreeNode<XT, YT>, TreeError> {
        majority_label(labels)
            .map(TreeNode::leaf)
            .ok_or(TreeError::EmptyDataset)
    }
}
