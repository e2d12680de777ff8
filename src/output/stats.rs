//! Statistics over a written batch artifact
//!
//! This module loads an artifact back into records and summarizes how
//! complete the extraction was.

use crate::output::json::read_records;
use crate::output::traits::OutputResult;
use crate::record::{EngineRecord, EngineType};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Artifact statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactStatistics {
    /// Number of records in the batch
    pub total_records: usize,

    /// Records with a parsed price
    pub with_price: usize,

    /// Records with at least one image
    pub with_images: usize,

    /// Images across all records
    pub total_images: usize,

    /// Count of records by engine type
    pub by_engine_type: HashMap<EngineType, usize>,

    /// Product IDs that appear more than once, with their counts
    ///
    /// The batch loader keeps the first occurrence of each.
    pub duplicate_product_ids: BTreeMap<u64, usize>,

    /// Records whose URL carried no product ID
    pub without_product_id: usize,
}

impl ArtifactStatistics {
    pub fn from_records(records: &[EngineRecord]) -> Self {
        let mut stats = Self {
            total_records: records.len(),
            ..Self::default()
        };
        let mut id_counts: BTreeMap<u64, usize> = BTreeMap::new();

        for record in records {
            if record.price.is_some() {
                stats.with_price += 1;
            }
            if !record.images.is_empty() {
                stats.with_images += 1;
            }
            stats.total_images += record.images.len();
            *stats.by_engine_type.entry(record.engine_type).or_insert(0) += 1;

            match record.product_id {
                Some(id) => *id_counts.entry(id).or_insert(0) += 1,
                None => stats.without_product_id += 1,
            }
        }

        stats.duplicate_product_ids = id_counts.into_iter().filter(|(_, n)| *n > 1).collect();
        stats
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        (count as f64 / self.total_records as f64) * 100.0
    }
}

/// Loads statistics from an artifact file
///
/// # Arguments
///
/// * `path` - The JSON batch artifact
///
/// # Returns
///
/// * `Ok(ArtifactStatistics)` - Successfully loaded statistics
/// * `Err(OutputError)` - The file could not be read or parsed
pub fn load_statistics(path: &Path) -> OutputResult<ArtifactStatistics> {
    let records = read_records(path)?;
    Ok(ArtifactStatistics::from_records(&records))
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ArtifactStatistics) {
    println!("=== Artifact Statistics ===\n");

    println!("Overview:");
    println!("  Total records: {}", stats.total_records);
    println!(
        "  With price: {} ({:.1}%)",
        stats.with_price,
        stats.percentage(stats.with_price)
    );
    println!(
        "  With images: {} ({:.1}%)",
        stats.with_images,
        stats.percentage(stats.with_images)
    );
    println!("  Total images: {}", stats.total_images);
    println!();

    println!("Records by Engine Type:");
    // Sort by count (descending)
    let mut type_counts: Vec<_> = stats.by_engine_type.iter().collect();
    type_counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.as_str().cmp(b.0.as_str())));

    for (engine_type, count) in type_counts {
        println!(
            "  {}: {} ({:.1}%)",
            engine_type,
            count,
            stats.percentage(*count)
        );
    }
    println!();

    if stats.without_product_id > 0 {
        println!("Records without product ID: {}", stats.without_product_id);
        println!();
    }

    if !stats.duplicate_product_ids.is_empty() {
        println!(
            "Duplicate Product IDs ({}):",
            stats.duplicate_product_ids.len()
        );
        for (id, count) in &stats.duplicate_product_ids {
            println!("  - {} x{}", id, count);
        }
    }
}
