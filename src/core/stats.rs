//! Line statistics: numeric sums and frequency tables.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SumResult {
    pub items: usize,
    pub sum: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// One-based numbers of lines skipped because they hold several fields.
    pub skipped: Vec<usize>,
}

impl SumResult {
    pub fn to_lines(&self) -> Vec<String> {
        let mean = match self.mean {
            Some(mean) => format!("{:15.2}", mean),
            None => format!("{:>15}", "-"),
        };
        vec![
            format!("items   {:15}", self.items),
            format!("sum     {:15.2}", self.sum),
            format!("mean    {}", mean),
        ]
    }
}

/// Sum one number per line.
///
/// Blank lines are ignored; lines containing a tab are skipped and reported.
/// A decimal comma is accepted and spaces inside the number are dropped
/// (`1 234,5` reads as 1234.5).
pub fn sum<S: AsRef<str>>(lines: &[S]) -> Result<SumResult> {
    let mut result = SumResult {
        items: 0,
        sum: 0.0,
        mean: None,
        skipped: Vec::new(),
    };

    for (offset, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let line_number = offset + 1;

        if line.trim().is_empty() {
            continue;
        }
        if line.contains('\t') {
            crate::log_status!("sum", "Skipping line {}: {}", line_number, line);
            result.skipped.push(line_number);
            continue;
        }

        let cleaned: String = line
            .trim()
            .replace(',', ".")
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        let value: f64 = cleaned
            .parse()
            .map_err(|e: std::num::ParseFloatError| {
                Error::number_parse_failed(line_number, line, e.to_string())
            })?;

        result.items += 1;
        result.sum += value;
    }

    if result.items > 0 {
        result.mean = Some(result.sum / result.items as f64);
    }

    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyLayout {
    /// Put the count after the value.
    pub count_right: bool,
    pub percentage: bool,
}

/// Count identical lines, most frequent first; ties keep first-seen order.
pub fn frequencies<S: AsRef<str>>(lines: &[S]) -> Vec<FrequencyEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for line in lines {
        let line = line.as_ref();
        let count = counts.entry(line).or_insert(0);
        if *count == 0 {
            order.push(line);
        }
        *count += 1;
    }

    let total = lines.len();
    let mut entries: Vec<FrequencyEntry> = order
        .into_iter()
        .map(|value| {
            let count = counts[value];
            FrequencyEntry {
                value: value.to_string(),
                count,
                percentage: count as f64 * 100.0 / total as f64,
            }
        })
        .collect();

    // stable sort keeps first-seen order among equal counts
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

pub fn format_frequency(entry: &FrequencyEntry, layout: FrequencyLayout) -> String {
    let percentage = format!("{:.2}%", entry.percentage);
    match (layout.count_right, layout.percentage) {
        (true, true) => format!("{}\t{}\t{}", entry.value, entry.count, percentage),
        (false, true) => format!("{}\t{}\t{}", entry.count, percentage, entry.value),
        (true, false) => format!("{}\t{}", entry.value, entry.count),
        (false, false) => format!("{}\t{}", entry.count, entry.value),
    }
}
