// In app/src/importer.rs

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use core_types::PriceBar;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Canonical column names, in the order they are matched against headers.
const COLUMNS: [&str; 6] = ["datetime", "open", "high", "low", "close", "volume"];

const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d-%b-%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Returns the first CSV or Excel file in `dir` whose name contains `marker`.
pub fn find_data_file(dir: &Path, marker: &str) -> Result<PathBuf> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory {}", dir.display()))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| extension_of(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str())))
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().contains(marker))
        })
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        anyhow!(
            "No {marker} data file found in {}. Supported formats: .csv, .xlsx, .xls",
            dir.display()
        )
    })
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Loads bars from a CSV file or from the first worksheet of an Excel workbook.
pub fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    match extension_of(path).as_deref() {
        Some("csv") => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            read_bars(file)
        }
        Some("xlsx" | "xls") => read_workbook(path),
        _ => bail!(
            "Unsupported file format: {}. Supported formats: .csv, .xlsx, .xls",
            path.display()
        ),
    }
}

/// Reads price bars from CSV. Rows with a missing or unparsable field are
/// dropped; any non-positive price or volume in the rest fails the import.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    parse_records(&headers, reader.records().map(|record| record.map_err(anyhow::Error::from)))
}

/// Reads price bars from the first worksheet of an `.xlsx` or `.xls` workbook.
/// The first row holds the headers.
pub fn read_workbook(path: &Path) -> Result<Vec<PriceBar>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("{} has no worksheets", path.display()))??;

    bars_from_cells(range.rows())
}

fn bars_from_cells<'a>(mut rows: impl Iterator<Item = &'a [Data]>) -> Result<Vec<PriceBar>> {
    let headers = rows
        .next()
        .map(cells_to_record)
        .ok_or_else(|| anyhow!("Worksheet is empty"))?;
    parse_records(&headers, rows.map(|row| Ok::<_, anyhow::Error>(cells_to_record(row))))
}

fn cells_to_record(cells: &[Data]) -> csv::StringRecord {
    cells.iter().map(cell_text).collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|datetime| datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::String(text) | Data::DateTimeIso(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

fn parse_records(
    headers: &csv::StringRecord,
    records: impl Iterator<Item = Result<csv::StringRecord>>,
) -> Result<Vec<PriceBar>> {
    let columns = map_columns(headers)?;

    let mut bars = Vec::new();
    let mut dropped = 0usize;
    for record in records {
        match parse_row(&record?, &columns) {
            Some(bar) => bars.push(bar),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Dropped rows with missing or unparsable values.");
    }
    validate(&bars)?;

    tracing::debug!(rows = bars.len(), "Parsed price data.");
    Ok(bars)
}

/// Maps each canonical column to the index of the first header containing it.
fn map_columns(headers: &csv::StringRecord) -> Result<[usize; 6]> {
    let mut found: [Option<usize>; 6] = [None; 6];

    for (index, header) in headers.iter().enumerate() {
        let Some(slot) = canonical_column(header) else {
            continue;
        };
        found[slot].get_or_insert(index);
    }

    let missing: Vec<&str> = COLUMNS
        .iter()
        .zip(found.iter())
        .filter(|(_, index)| index.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        bail!("Missing required columns: {}", missing.join(", "));
    }

    Ok(found.map(|index| index.unwrap_or_default()))
}

fn canonical_column(header: &str) -> Option<usize> {
    let header = header.to_lowercase();
    if header.contains("date") || header.contains("time") {
        return Some(0);
    }
    COLUMNS[1..]
        .iter()
        .position(|name| header.contains(name))
        .map(|position| position + 1)
}

fn parse_row(record: &csv::StringRecord, columns: &[usize; 6]) -> Option<PriceBar> {
    let field = |slot: usize| record.get(columns[slot]).filter(|value| !value.is_empty());

    Some(PriceBar {
        timestamp: parse_datetime(field(0)?)?,
        open: parse_number(field(1)?)?,
        high: parse_number(field(2)?)?,
        low: parse_number(field(3)?)?,
        close: parse_number(field(4)?)?,
        volume: parse_number(field(5)?)? as i64,
    })
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn validate(bars: &[PriceBar]) -> Result<()> {
    if bars
        .iter()
        .any(|bar| bar.open <= 0.0 || bar.high <= 0.0 || bar.low <= 0.0 || bar.close <= 0.0)
    {
        bail!("Price values must be positive");
    }
    if bars.iter().any(|bar| bar.volume <= 0) {
        bail!("Volume values must be positive");
    }
    Ok(())
}
