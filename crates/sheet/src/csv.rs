use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::grid::Grid;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Grid {
    /// Load a grid from a reader.
    ///
    /// Every field is kept as text exactly as written: `007` stays `007`
    /// and `1.50` stays `1.50`. Records may have differing field counts;
    /// spreadsheet exports are often ragged above the header.
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut grid = Grid::new();

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| CellValue::String(field.to_string()))
                .collect();
            grid.push_row(row);
        }

        Ok(grid)
    }

    /// Load a grid from file contents, choosing the reader by extension:
    /// `csv` and `tsv` (any case) are delimited text, anything else is a
    /// workbook whose format is detected from the bytes.
    pub fn from_bytes(bytes: &[u8], extension: Option<&str>) -> Result<Self> {
        let extension = extension.map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Self::from_csv_reader(bytes, CsvOptions::default()),
            Some("tsv") => Self::from_csv_reader(bytes, CsvOptions::tsv()),
            _ => Self::from_workbook_bytes(bytes),
        }
    }

    /// Load a grid from a file; see [`Grid::from_bytes`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes, path.extension().and_then(|ext| ext.to_str()))
    }

    /// Save the grid to a CSV file
    pub fn save_as_csv<P: AsRef<Path>>(&self, path: P, options: CsvOptions) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_csv(writer, options)
    }

    /// Write the grid to a writer as CSV.
    ///
    /// Every row must have the same number of cells; a ragged grid fails
    /// with a CSV error instead of producing misaligned output.
    pub fn write_csv<W: Write>(&self, writer: W, options: CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .from_writer(writer);

        for row in self.rows() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the grid to a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        self.to_csv_string_with_options(CsvOptions::default())
    }

    /// Convert the grid to a CSV string with custom options
    pub fn to_csv_string_with_options(&self, options: CsvOptions) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer, options)?;
        String::from_utf8(buffer).map_err(SheetError::from)
    }
}
