use std::collections::HashMap;

use crate::result::{LabelCountRow, SplitCountRow};

/// Chart 1: one bar per label, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub values: Vec<u64>,
}

/// One grouped-bar trace: a single split's values, aligned to the category
/// order of the owning [`GroupedSeries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTrace {
    pub name: String,
    pub values: Vec<u64>,
    /// Percentage-of-split-total label per bar, e.g. `"23.5%"`.
    pub percent_labels: Vec<String>,
}

/// Chart 2: grouped bars, one trace per split.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedSeries {
    pub categories: Vec<String>,
    pub traces: Vec<SplitTrace>,
}

/// Map `sql_1` rows one-to-one onto a category/value series, preserving
/// row order.
pub fn build_chart1(rows: &[LabelCountRow]) -> CategorySeries {
    CategorySeries {
        categories: rows.iter().map(|row| row.label.clone()).collect(),
        values: rows.iter().map(|row| row.instance_count).collect(),
    }
}

/// Aggregate `sql_2` rows into grouped traces, one per split.
///
/// `category_order` is used verbatim when non-empty so that chart 2 lines up
/// with chart 1; otherwise categories are the distinct labels, sorted
/// ascending. Rows for the same (split, label) pair are summed. A split with
/// a zero total keeps a denominator of 1 for its percentage labels.
pub fn build_chart2(rows: &[SplitCountRow], category_order: &[String]) -> GroupedSeries {
    let categories: Vec<String> = if category_order.is_empty() {
        let mut labels: Vec<String> = Vec::new();
        for row in rows {
            if !labels.contains(&row.label) {
                labels.push(row.label.clone());
            }
        }
        labels.sort();
        labels
    } else {
        category_order.to_vec()
    };

    // Splits keep first-seen order.
    let mut splits: Vec<String> = Vec::new();
    for row in rows {
        if !splits.contains(&row.split) {
            splits.push(row.split.clone());
        }
    }

    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in rows {
        *counts
            .entry((row.split.as_str(), row.label.as_str()))
            .or_default() += row.objects;
        *totals.entry(row.split.as_str()).or_default() += row.objects;
    }

    let traces = splits
        .iter()
        .map(|split| {
            let total = totals.get(split.as_str()).copied().unwrap_or(0).max(1);
            let values: Vec<u64> = categories
                .iter()
                .map(|label| {
                    counts
                        .get(&(split.as_str(), label.as_str()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect();
            let percent_labels = values
                .iter()
                .map(|value| format!("{:.1}%", *value as f64 / total as f64 * 100.0))
                .collect();
            SplitTrace {
                name: split.clone(),
                values,
                percent_labels,
            }
        })
        .collect();

    GroupedSeries { categories, traces }
}
