// Sales record model
//
// One row of the dataset plus the two fixed enumerations it is keyed by.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SalescopeError;

/// Lower bound applied to generated profit values.
pub const PROFIT_FLOOR: f64 = 1.0;

/// Sales region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
        }
    }
}

/// Product category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home Goods")]
    HomeGoods,
    Books,
    Food,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeGoods,
        Category::Books,
        Category::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeGoods => "Home Goods",
            Category::Books => "Books",
            Category::Food => "Food",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = SalescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| SalescopeError::InvalidFilter(format!("unknown region '{}'", s)))
    }
}

impl FromStr for Category {
    type Err = SalescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SalescopeError::InvalidFilter(format!("unknown category '{}'", s)))
    }
}

/// A single synthetic sales transaction.
///
/// Field names follow the CSV header: `Date,Region,ProductCategory,UnitsSold,PricePerUnit,Sales,Profit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "ProductCategory")]
    pub category: Category,
    #[serde(rename = "UnitsSold")]
    pub units_sold: u32,
    #[serde(rename = "PricePerUnit")]
    pub price_per_unit: f64,
    #[serde(rename = "Sales")]
    pub sales: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for r in Region::ALL {
            assert_eq!(r.as_str().parse::<Region>().unwrap(), r);
        }
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("Northeast".parse::<Region>().is_err());
        assert!("HomeGoods".parse::<Category>().is_err());
        assert!("north".parse::<Region>().is_err());
    }

    #[test]
    fn home_goods_serializes_with_space() {
        let json = serde_json::to_string(&Category::HomeGoods).unwrap();
        assert_eq!(json, "\"Home Goods\"");
    }
}
