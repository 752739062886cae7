use cart_trees::data::dataset::Dataset;
use cart_trees::metrics::confusion::ClassificationMetrics;
use cart_trees::trees::classifier::DecisionTreeClassifier;
use csv::ReaderBuilder;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::env;
use std::error::Error;

/// Reads a CSV whose last column is the class label; label strings are mapped
/// to dense ids in order of first appearance.
fn read_classification_csv(
    file_path: &str,
    header: bool,
) -> Result<Dataset<f64, u8>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut label_map = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let width = record.len().checked_sub(1).ok_or("Empty record")?;
        let mut feature_row = Vec::with_capacity(width);

        for feature in record.iter().take(width) {
            feature_row.push(feature.trim().parse::<f64>()?);
        }

        let label = record.get(width).ok_or("Missing label")?;
        let next_id = label_map.len() as u8;
        let label_id = *label_map.entry(label.to_string()).or_insert(next_id);

        features.push(feature_row);
        labels.push(label_id);
    }

    if features.is_empty() {
        return Err("No rows in input file".into());
    }
    let feature_matrix =
        DMatrix::from_row_slice(features.len(), features[0].len(), &features.concat());
    let label_vector = DVector::from_vec(labels);

    Ok(Dataset::new(feature_matrix, label_vector))
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "datasets/data_banknote_authentication.csv".to_string());

    let dataset = read_classification_csv(&path, false)?;
    println!("Loaded {} rows from {}", dataset.nrows(), path);

    let (train_dataset, test_dataset) = dataset.train_test_split(0.8, Some(1))?;

    let mut classifier = DecisionTreeClassifier::new();
    classifier.fit(&train_dataset)?;

    let predictions = classifier.predict(&test_dataset.x)?;
    let accuracy = classifier.accuracy(&test_dataset.y, &predictions)?;
    println!("Accuracy: {}%", accuracy * 100.0);

    for line in classifier.render()? {
        println!("{}", line);
    }

    Ok(())
}
