//! Text dump of a run: parameters followed by the bias field.
//!
//! Layout:
//!
//! ```text
//! gsd_min,1.75
//! ...            (one `key,value` line per parameter)
//!                (blank line)
//! 12.5,-3.25,###,
//! ...            (one line per GSD row, every cell followed by a comma)
//! ```
//!
//! Masked cells are written as `###`, never as a number, so spreadsheets and
//! renderers can keep them apart from a genuine zero bias.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{BiasCell, BiasField, RunParameters};
use crate::error::AppError;

/// Placeholder written for masked cells.
pub const MASKED_TOKEN: &str = "###";

/// Render the dump as a string.
pub fn render_dump(params: &RunParameters, field: &BiasField) -> String {
    let mut out = String::new();
    for (key, value) in params.to_pairs() {
        out.push_str(&format!("{key},{value}\n"));
    }
    out.push('\n');
    for row in field.rows() {
        for cell in row {
            match cell {
                BiasCell::Value(v) => out.push_str(&format!("{v},")),
                BiasCell::Masked => {
                    out.push_str(MASKED_TOKEN);
                    out.push(',');
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Write the dump to `path`.
pub fn write_dump(path: &Path, params: &RunParameters, field: &BiasField) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create dump '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_dump(params, field).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::io(format!("Failed to write dump '{}': {e}", path.display())))?;
    Ok(())
}

/// Parse a dump produced by [`render_dump`].
pub fn parse_dump(text: &str) -> Result<(RunParameters, BiasField), AppError> {
    let mut lines = text.lines();

    let mut pairs = Vec::new();
    for (n, line) in lines.by_ref().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        let (key, value) = line.split_once(',').ok_or_else(|| {
            AppError::configuration(format!("Dump line {}: expected key,value, got '{line}'.", n + 1))
        })?;
        pairs.push((key, value));
    }
    let params = RunParameters::from_pairs(pairs)?;

    let body = lines.collect::<Vec<_>>().join("\n");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| AppError::io(format!("Dump field row {}: {e}", i + 1)))?;
        // Every cell is written with a trailing comma, leaving an empty last field.
        let mut fields: Vec<&str> = record.iter().collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        if fields.is_empty() {
            continue;
        }
        let row = fields.into_iter().map(parse_cell).collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Ok((params, BiasField::from_rows(rows)?))
}

/// Read and parse a dump file.
pub fn read_dump(path: &Path) -> Result<(RunParameters, BiasField), AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read dump '{}': {e}", path.display())))?;
    parse_dump(&text)
}

fn parse_cell(token: &str) -> Result<BiasCell, AppError> {
    if token == MASKED_TOKEN {
        return Ok(BiasCell::Masked);
    }
    token
        .parse::<f64>()
        .map(BiasCell::Value)
        .map_err(|e| AppError::io(format!("Invalid bias cell '{token}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> BiasField {
        BiasField::from_rows(vec![
            vec![BiasCell::Value(12.5), BiasCell::Masked],
            vec![BiasCell::Value(-3.25), BiasCell::Value(0.0)],
        ])
        .unwrap()
    }

    #[test]
    fn layout_has_params_blank_line_and_rows() {
        let text = render_dump(&RunParameters::default(), &sample_field());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "gsd_min,1.75");
        let blank = lines.iter().position(|l| l.is_empty()).unwrap();
        assert_eq!(blank, RunParameters::default().to_pairs().len());
        assert_eq!(lines[blank + 1], "12.5,###,");
        assert_eq!(lines[blank + 2], "-3.25,0,");
    }

    #[test]
    fn masked_cells_survive_reading_back() {
        let params = RunParameters {
            area_of_interest: false,
            ..RunParameters::default()
        };
        let text = render_dump(&params, &sample_field());
        let (back_params, back_field) = parse_dump(&text).unwrap();
        assert_eq!(back_params, params);
        assert_eq!(back_field, sample_field());
    }

    #[test]
    fn file_roundtrip() {
        let path = std::env::temp_dir().join(format!("biasmap_dump_{}.csv", std::process::id()));
        write_dump(&path, &RunParameters::default(), &sample_field()).unwrap();
        let (_, field) = read_dump(&path).unwrap();
        assert_eq!(field.masked_count(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn padded_rows_and_trailing_commas_are_accepted() {
        let text = "gsd_min,1.75\n\n 1.5 , ### ,\n\n-2,  0.25\n   \n";
        let (_, field) = parse_dump(text).unwrap();
        assert_eq!(field.n_gsd(), 2);
        assert_eq!(field.n_mmad(), 2);
        assert_eq!(field.get(0, 1), Some(BiasCell::Masked));
        assert_eq!(field.get(1, 0), Some(BiasCell::Value(-2.0)));
        assert_eq!(field.get(1, 1), Some(BiasCell::Value(0.25)));
    }

    #[test]
    fn empty_interior_cell_is_rejected() {
        let text = "gsd_min,1.75\n\n1.0,,2.0,\n";
        assert!(parse_dump(text).is_err());
    }

    #[test]
    fn garbage_cell_is_rejected() {
        let text = "gsd_min,1.75\n\n1.0,abc,\n";
        assert!(parse_dump(text).is_err());
    }
}
