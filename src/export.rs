//! Per-product opinion downloads in JSON, CSV, or XLSX.
//!
//! Every format is derived on the fly from the stored opinions file; nothing
//! converted is cached.

use crate::ceneo::models::Opinion;
use crate::error::{Error, Result};
use crate::store::Store;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Download file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Download file name, e.g. `123456.csv`.
    pub fn file_name(&self, product_id: &str) -> String {
        format!("{}.{}", product_id, self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(format!("Unknown export format: {}. Use: json, csv, xlsx", s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

const COLUMN_COUNT: usize = 11;

/// Column order shared by CSV and XLSX.
const COLUMNS: [&str; COLUMN_COUNT] = [
    "opinion_id",
    "author",
    "recommendation",
    "stars",
    "content",
    "useful",
    "useless",
    "published",
    "purchased",
    "pros",
    "cons",
];

const LIST_SEPARATOR: &str = "; ";

/// One flat CSV row.
#[derive(Debug, Serialize)]
struct OpinionRow<'a> {
    opinion_id: &'a str,
    author: Option<&'a str>,
    recommendation: String,
    stars: Option<&'a str>,
    content: Option<&'a str>,
    useful: Option<u32>,
    useless: Option<u32>,
    published: Option<&'a str>,
    purchased: Option<&'a str>,
    pros: String,
    cons: String,
}

impl<'a> From<&'a Opinion> for OpinionRow<'a> {
    fn from(opinion: &'a Opinion) -> Self {
        Self {
            opinion_id: &opinion.opinion_id,
            author: opinion.author.as_deref(),
            recommendation: opinion.recommendation.to_string(),
            stars: opinion.stars.as_deref(),
            content: opinion.content.as_deref(),
            useful: opinion.useful,
            useless: opinion.useless,
            published: opinion.published.as_deref(),
            purchased: opinion.purchased.as_deref(),
            pros: opinion.pros.join(LIST_SEPARATOR),
            cons: opinion.cons.join(LIST_SEPARATOR),
        }
    }
}

/// One worksheet cell.
#[derive(Debug, Clone, PartialEq)]
enum Cell<'a> {
    Text(Cow<'a, str>),
    Number(u32),
    Empty,
}

fn text(value: Option<&str>) -> Cell<'_> {
    value.map_or(Cell::Empty, |v| Cell::Text(Cow::Borrowed(v)))
}

fn number(value: Option<u32>) -> Cell<'static> {
    value.map_or(Cell::Empty, Cell::Number)
}

fn list(items: &[String]) -> Cell<'static> {
    if items.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(Cow::Owned(items.join(LIST_SEPARATOR)))
    }
}

/// Worksheet cells of one opinion, in `COLUMNS` order.
fn cells(opinion: &Opinion) -> [Cell<'_>; COLUMN_COUNT] {
    [
        Cell::Text(Cow::Borrowed(opinion.opinion_id.as_str())),
        text(opinion.author.as_deref()),
        Cell::Text(Cow::Owned(opinion.recommendation.to_string())),
        text(opinion.stars.as_deref()),
        text(opinion.content.as_deref()),
        number(opinion.useful),
        number(opinion.useless),
        text(opinion.published.as_deref()),
        text(opinion.purchased.as_deref()),
        list(&opinion.pros),
        list(&opinion.cons),
    ]
}

/// Builds the download for one stored product.
pub fn export_opinions(store: &Store, product_id: &str, format: ExportFormat) -> Result<Vec<u8>> {
    debug!("Exporting {} as {}", product_id, format);

    match format {
        ExportFormat::Json => store.opinions_bytes(product_id),
        ExportFormat::Csv => to_csv(&store.load_opinions(product_id)?),
        ExportFormat::Xlsx => to_xlsx(&store.load_opinions(product_id)?),
    }
}

/// Header row plus one row per opinion.
pub fn to_csv(opinions: &[Opinion]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if opinions.is_empty() {
        writer.write_record(COLUMNS)?;
    }
    for opinion in opinions {
        writer.serialize(OpinionRow::from(opinion))?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// Single "Opinions" worksheet with a bold header row.
pub fn to_xlsx(opinions: &[Opinion]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Opinions")?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, opinion) in opinions.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, cell) in cells(opinion).iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(value) => {
                    sheet.write_string(row, col, &**value)?;
                }
                Cell::Number(value) => {
                    sheet.write_number(row, col, *value)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
