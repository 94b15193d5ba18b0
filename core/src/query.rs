// Filtering and aggregation over the sales table
//
// Every call recomputes from the immutable dataset; nothing is cached.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::record::{Category, Region, SalesRecord};
use crate::SalescopeError;

/// Sentinel value meaning "do not filter on this field".
pub const ALL: &str = "All";

/// Dropdown choice: either the `All` sentinel or one concrete value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = SalescopeError>,
{
    type Err = SalescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => v.fmt(f),
        }
    }
}

/// Current (region, category) dropdown state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub region: Selection<Region>,
    pub category: Selection<Category>,
}

impl FilterState {
    pub fn new(region: Selection<Region>, category: Selection<Category>) -> Self {
        Self { region, category }
    }

    /// Parse raw dropdown values; `None` means `All`.
    pub fn parse(region: Option<&str>, category: Option<&str>) -> crate::Result<Self> {
        Ok(Self {
            region: region
                .map(str::parse::<Selection<Region>>)
                .transpose()?
                .unwrap_or_default(),
            category: category
                .map(str::parse::<Selection<Category>>)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.region.matches(&record.region) && self.category.matches(&record.category)
    }

    /// Rows matching both selections, in table order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a SalesRecord> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sales total for one calendar month, labelled by the month's last day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month_end: NaiveDate,
    pub sales: f64,
}

/// Sum of a column for one group key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: f64,
}

/// Monthly sales, chronological, covering every month between the first and
/// last row (empty months inside the range carry zero).
pub fn monthly_sales(rows: &[&SalesRecord]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in rows {
        *by_month.entry((r.date.year(), r.date.month())).or_default() += r.sales;
    }
    let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut month = first;
    while month <= last {
        if let Some(month_end) = month_end(month.0, month.1) {
            out.push(MonthlyTotal {
                month_end,
                sales: by_month.get(&month).copied().unwrap_or(0.0),
            });
        }
        month = next_month(month);
    }
    out
}

fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (y, m) = next_month((year, month));
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

/// Sales per category, highest first.
pub fn sales_by_category(rows: &[&SalesRecord]) -> Vec<GroupTotal<Category>> {
    let mut totals = group_sum(rows, |r| r.category, |r| r.sales);
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Profit per region, ordered alphabetically by region name.
pub fn profit_by_region(rows: &[&SalesRecord]) -> Vec<GroupTotal<Region>> {
    let mut totals = group_sum(rows, |r| r.region, |r| r.profit);
    totals.sort_by_key(|g| g.key.as_str());
    totals
}

fn group_sum<K: Ord + Copy>(
    rows: &[&SalesRecord],
    key: impl Fn(&SalesRecord) -> K,
    value: impl Fn(&SalesRecord) -> f64,
) -> Vec<GroupTotal<K>> {
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for r in rows {
        *groups.entry(key(*r)).or_default() += value(*r);
    }
    groups
        .into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .collect()
}

/// The three aggregates behind the dashboard for one filter state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    /// Number of rows that passed the filter.
    pub rows: usize,
    pub monthly_sales: Vec<MonthlyTotal>,
    pub sales_by_category: Vec<GroupTotal<Category>>,
    pub profit_by_region: Vec<GroupTotal<Region>>,
}

impl DashboardView {
    pub fn compute(dataset: &Dataset, filter: &FilterState) -> Self {
        let rows = filter.apply(dataset);
        Self {
            rows: rows.len(),
            monthly_sales: monthly_sales(&rows),
            sales_by_category: sales_by_category(&rows),
            profit_by_region: profit_by_region(&rows),
        }
    }
}
