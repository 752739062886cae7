//! # cart-trees
//!
//! `cart-trees` grows binary decision tree classifiers from labeled tabular
//! data using CART induction with Gini-impurity splitting, then classifies
//! new rows by walking the fitted tree. It also ships a small dataset
//! container and evaluation metrics for the surrounding glue.
//!
//! ## Getting Started
//!
//! To use `cart-trees`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! cart-trees = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can fit a tree on a small table and
//! classify two fresh rows:
//!
//! ```rust
//! use cart_trees::data::dataset::Dataset;
//! use cart_trees::trees::classifier::DecisionTreeClassifier;
//! use nalgebra::{DMatrix, DVector};
//!
//! let x = DMatrix::from_row_slice(4, 2, &[1.0, 9.0, 2.0, 8.0, 7.0, 1.0, 8.0, 2.0]);
//! let y = DVector::from_vec(vec![0u8, 0, 1, 1]);
//!
//! let dataset = Dataset::new(x, y);
//!
//! let mut model = DecisionTreeClassifier::with_params(Some(3), Some(1)).unwrap();
//!
//! model.fit(&dataset).unwrap();
//!
//! let test_x = DMatrix::from_row_slice(2, 2, &[1.5, 8.5, 7.5, 1.5]);
//!
//! let predictions = model.predict(&test_x).unwrap();
//! assert_eq!(predictions, DVector::from_vec(vec![0u8, 1]));
//! ```

/// Dataset container and numeric trait bounds
pub mod data;
/// Error types
pub mod errors;
/// Functions for evaluating classifier performance
pub mod metrics;
/// Decision tree induction, prediction and rendering
pub mod trees;
