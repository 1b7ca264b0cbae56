use std::path::{Path, PathBuf};

use thiserror::Error;

use stockroom_parties::Supplier;
use stockroom_products::Product;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing is loaded, so no document is produced.
    #[error("no data to export")]
    NoData,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One cell of an exported row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CsvField<'a> {
    /// Always quoted; `None` renders as `""`.
    Text(Option<&'a str>),
    Integer(i64),
    Decimal(f64),
}

impl CsvField<'_> {
    fn write_to(&self, out: &mut String) {
        match self {
            CsvField::Text(value) => {
                out.push('"');
                for c in value.unwrap_or_default().chars() {
                    if c == '"' {
                        out.push('"');
                    }
                    out.push(c);
                }
                out.push('"');
            }
            CsvField::Integer(v) => out.push_str(&v.to_string()),
            CsvField::Decimal(v) => out.push_str(&v.to_string()),
        }
    }
}

/// A record type with a fixed CSV layout.
pub trait CsvRecord {
    /// Download name, e.g. `products.csv`.
    const FILE_NAME: &'static str;

    /// Header cells, in column order.
    fn headers() -> &'static [&'static str];

    /// Row cells, in the same order as [`CsvRecord::headers`].
    fn fields(&self) -> Vec<CsvField<'_>>;
}

impl CsvRecord for Product {
    const FILE_NAME: &'static str = "products.csv";

    fn headers() -> &'static [&'static str] {
        &[
            "ID",
            "Name",
            "Description",
            "Stock Quantity",
            "Reorder Level",
            "Maximum Stock Level",
            "Price",
        ]
    }

    fn fields(&self) -> Vec<CsvField<'_>> {
        vec![
            CsvField::Integer(self.id.get()),
            CsvField::Text(Some(&self.name)),
            CsvField::Text(self.description.as_deref()),
            CsvField::Integer(self.stock_quantity),
            CsvField::Integer(self.reorder_level),
            CsvField::Integer(self.maximum_stock_level),
            CsvField::Decimal(self.price),
        ]
    }
}

impl CsvRecord for Supplier {
    const FILE_NAME: &'static str = "suppliers.csv";

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Contact Info"]
    }

    fn fields(&self) -> Vec<CsvField<'_>> {
        vec![
            CsvField::Integer(self.id.get()),
            CsvField::Text(Some(&self.name)),
            CsvField::Text(self.contact_info.as_deref()),
        ]
    }
}

/// A rendered CSV file, ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub file_name: &'static str,
    pub content: String,
}

impl CsvDocument {
    pub const CONTENT_TYPE: &'static str = "text/csv; charset=utf-8";

    /// `Content-Disposition` value naming the download.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }

    /// Write the document as `dir/<file_name>`, returning the full path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(self.file_name);
        std::fs::write(&path, &self.content).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Render `records` as CSV: a header line, then one line per record, joined
/// by `\n` with no trailing newline.
///
/// An empty slice yields [`ExportError::NoData`] rather than a header-only file.
pub fn export<T: CsvRecord>(records: &[T]) -> Result<CsvDocument, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut content = T::headers().join(",");
    for record in records {
        content.push('\n');
        for (idx, field) in record.fields().iter().enumerate() {
            if idx > 0 {
                content.push(',');
            }
            field.write_to(&mut content);
        }
    }

    Ok(CsvDocument {
        file_name: T::FILE_NAME,
        content,
    })
}
