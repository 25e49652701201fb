use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use tracing::debug;

/// Reads one decimal column from a CSV file with a header row, oldest row first.
pub(crate) fn read_column(path: &Path, column: &str) -> Result<Vec<Decimal>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .clone();
    let index = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(column))
        .ok_or_else(|| anyhow!("column `{column}` not found in {}", path.display()))?;

    let mut prices = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read record {}", idx + 1))?;
        let field = record
            .get(index)
            .ok_or_else(|| anyhow!("record {} has no `{column}` field", idx + 1))?;
        let price = Decimal::from_str(field)
            .with_context(|| format!("invalid price `{field}` in record {}", idx + 1))?;
        prices.push(price);
    }
    debug!(path = %path.display(), samples = prices.len(), "loaded price column");
    Ok(prices)
}
