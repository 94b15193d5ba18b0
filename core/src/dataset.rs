//! CSV dataset persistence and the in-memory sales table.
//!
//! The file carries a header row and one row per record:
//!   Date, Region, ProductCategory, UnitsSold, PricePerUnit, Sales, Profit

use chrono::NaiveDate;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::record::{Category, Region, SalesRecord};
use crate::{Result, SalescopeError};

/// Header columns, in file order.
pub const COLUMNS: [&str; 7] = [
    "Date",
    "Region",
    "ProductCategory",
    "UnitsSold",
    "PricePerUnit",
    "Sales",
    "Profit",
];

/// Write records as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, records: &[SalesRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    // An empty table still gets its header.
    if records.is_empty() {
        csv_writer.write_record(COLUMNS)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create or overwrite `path` with the given records.
pub fn save(path: impl AsRef<Path>, records: &[SalesRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(file, records)?;
    info!(path = %path.display(), rows = records.len(), "Saved sales data");
    Ok(())
}

/// Parse a CSV stream into a dataset.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(malformed)?.clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SalescopeError::Malformed {
                line: 1,
                reason: format!("missing column '{}'", column),
            });
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: SalesRecord = result.map_err(malformed)?;
        records.push(record);
    }
    debug!(rows = records.len(), "Parsed sales CSV");
    Ok(Dataset::new(records))
}

fn malformed(e: csv::Error) -> SalescopeError {
    let line = e.position().map(|p| p.line()).unwrap_or(1);
    let reason = match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => e.to_string(),
    };
    SalescopeError::Malformed { line, reason }
}

/// Immutable in-memory sales table.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// Load a CSV file. A missing file maps to `DataNotFound`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SalescopeError::DataNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let dataset = read_csv(file)?;
        info!(path = %path.display(), rows = dataset.len(), "Loaded sales data");
        Ok(dataset)
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct regions in order of first appearance.
    pub fn regions(&self) -> Vec<Region> {
        distinct(self.records.iter().map(|r| r.region))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        distinct(self.records.iter().map(|r| r.category))
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_records(&self.records)
    }
}

fn distinct<T: PartialEq + Copy>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

/// Descriptive statistics for one numeric column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStats {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN below two values.
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnStats {
    fn from_values(name: &'static str, mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.total_cmp(b));
        let count = values.len();
        if count == 0 {
            return Self {
                name,
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                p25: f64::NAN,
                p50: f64::NAN,
                p75: f64::NAN,
                max: f64::NAN,
            };
        }
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if count > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };
        Self {
            name,
            count,
            mean,
            std,
            min: values[0],
            p25: percentile(&values, 0.25),
            p50: percentile(&values, 0.50),
            p75: percentile(&values, 0.75),
            max: values[count - 1],
        }
    }
}

/// Linear interpolation between closest ranks over sorted values.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Summary printed after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub columns: Vec<ColumnStats>,
}

impl DatasetSummary {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        fn column(
            name: &'static str,
            records: &[SalesRecord],
            f: fn(&SalesRecord) -> f64,
        ) -> ColumnStats {
            ColumnStats::from_values(name, records.iter().map(f).collect())
        }
        Self {
            rows: records.len(),
            first_date: records.iter().map(|r| r.date).min(),
            last_date: records.iter().map(|r| r.date).max(),
            columns: vec![
                column("UnitsSold", records, |r| f64::from(r.units_sold)),
                column("PricePerUnit", records, |r| r.price_per_unit),
                column("Sales", records, |r| r.sales),
                column("Profit", records, |r| r.profit),
            ],
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.rows)?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            writeln!(f, "dates: {} .. {}", first, last)?;
        }
        write!(f, "{:<8}", "")?;
        for c in &self.columns {
            write!(f, "{:>14}", c.name)?;
        }
        writeln!(f)?;
        let rows: [(&str, fn(&ColumnStats) -> f64); 8] = [
            ("count", |c| c.count as f64),
            ("mean", |c| c.mean),
            ("std", |c| c.std),
            ("min", |c| c.min),
            ("25%", |c| c.p25),
            ("50%", |c| c.p50),
            ("75%", |c| c.p75),
            ("max", |c| c.max),
        ];
        for (label, value) in rows {
            write!(f, "{:<8}", label)?;
            for c in &self.columns {
                write!(f, "{:>14.2}", value(c))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Date,Region,ProductCategory,UnitsSold,PricePerUnit,Sales,Profit
2022-01-05,North,Electronics,3,100.0,310.5,80.25
2022-01-20,South,Home Goods,1,50.0,45.0,1.0
2022-03-02,North,Books,10,12.5,130.0,30.0
";

    #[test]
    fn load_sample_csv() {
        let dataset = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        let first = &dataset.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2022, 1, 5).unwrap());
        assert_eq!(first.region, Region::North);
        assert_eq!(dataset.records()[1].category, Category::HomeGoods);
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let dataset = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.regions(), vec![Region::North, Region::South]);
        assert_eq!(
            dataset.categories(),
            vec![Category::Electronics, Category::HomeGoods, Category::Books]
        );
    }

    #[test]
    fn bad_number_reports_line() {
        let csv = "\
Date,Region,ProductCategory,UnitsSold,PricePerUnit,Sales,Profit
2022-01-05,North,Electronics,3,100.0,310.5,80.25
2022-01-06,North,Electronics,three,100.0,310.5,80.25
";
        match read_csv(csv.as_bytes()) {
            Err(SalescopeError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn missing_column_is_malformed() {
        let csv = "Date,Region,Sales\n2022-01-05,North,10.0\n";
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(SalescopeError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn empty_table_writes_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim_end(), COLUMNS.join(","));
        assert!(read_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.5), 2.5);
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 1.0), 4.0);
    }

    #[test]
    fn summary_counts_rows_and_dates() {
        let dataset = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let summary = dataset.summary();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2022, 1, 5));
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2022, 3, 2));
        let units = &summary.columns[0];
        assert_eq!(units.min, 1.0);
        assert_eq!(units.max, 10.0);
        assert!(summary.to_string().contains("PricePerUnit"));
    }
}
