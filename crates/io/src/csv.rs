// Delimited-file import/export for the pipeline boundary

use std::io::Read;
use std::path::Path;

use wellstat_analysis::model::AnalyzedRecord;
use wellstat_recon::model::{MergedRecord, RawTable};

use crate::error::IoError;

/// Read a raw scraped table: decode, sniff the delimiter, parse with the
/// first row as column labels. Rows may be ragged; missing cells read back
/// as empty downstream.
pub fn read_raw_table(path: &Path) -> Result<RawTable, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| parse_err(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_err(path, e))?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(RawTable::new(columns, rows))
}

/// Write analyzed records as CSV. Serde supplies the header row from the
/// record's field names, so the on-disk schema follows the struct.
pub fn write_analyzed(path: &Path, records: &[AnalyzedRecord]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_err(path, e))?;

    for record in records {
        writer.serialize(record).map_err(|e| write_err(path, e))?;
    }

    // An empty set still gets its header row, so downstream consumers see
    // the schema even for a zero-row join result.
    if records.is_empty() {
        writer
            .write_record([
                "country",
                "gdp",
                "life_expectancy",
                "literacy",
                "gdp_zscore",
                "life_expectancy_zscore",
                "literacy_zscore",
                "efficiency_gap",
            ])
            .map_err(|e| write_err(path, e))?;
    }

    writer.flush().map_err(|e| write_err(path, e))
}

/// Write the intermediate merged table (pre-analysis), match key included
/// for provenance.
pub fn write_merged(path: &Path, records: &[MergedRecord]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_err(path, e))?;

    for record in records {
        writer.serialize(record).map_err(|e| write_err(path, e))?;
    }

    if records.is_empty() {
        writer
            .write_record(["match_key", "country", "gdp", "life_expectancy", "literacy"])
            .map_err(|e| write_err(path, e))?;
    }

    writer.flush().map_err(|e| write_err(path, e))
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| read_err(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| read_err(path, e))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties — more columns = more likely real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn read_err(path: &Path, e: impl std::fmt::Display) -> IoError {
    IoError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn parse_err(path: &Path, e: impl std::fmt::Display) -> IoError {
    IoError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn write_err(path: &Path, e: impl std::fmt::Display) -> IoError {
    IoError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
