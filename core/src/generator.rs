// Synthetic sales data generator
//
// Draws independent records: uniform dates, regions, categories, units and
// prices, with Gaussian noise on sales and profit.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

use crate::record::{Category, Region, SalesRecord, PROFIT_FLOOR};

const UNITS_RANGE: std::ops::Range<u32> = 1..20;
const PRICE_RANGE: std::ops::Range<f64> = 10.0..500.0;
const MARGIN_RANGE: std::ops::Range<f64> = 0.1..0.4;
const SALES_NOISE_SIGMA: f64 = 50.0;
const PROFIT_NOISE_SIGMA: f64 = 20.0;

/// Generator parameters
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub samples: usize,
    pub seed: u64,
    pub start_date: NaiveDate,
    /// Number of distinct days dates are drawn from, starting at `start_date`.
    pub span_days: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 2000,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            span_days: 730,
        }
    }
}

/// Generate `config.samples` records from an RNG seeded with `config.seed`.
pub fn generate(config: &GeneratorConfig) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    generate_with(&mut rng, config)
}

/// Generate records from a caller-supplied RNG. `config.seed` is ignored.
pub fn generate_with<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> Vec<SalesRecord> {
    debug!(
        samples = config.samples,
        start = %config.start_date,
        span_days = config.span_days,
        "Generating synthetic sales records"
    );
    let span = i64::from(config.span_days.max(1));
    (0..config.samples)
        .map(|_| {
            let offset = rng.gen_range(0..span);
            let date = config.start_date + Duration::days(offset);
            // `choose` only returns None for an empty slice.
            let region = *Region::ALL.choose(rng).unwrap_or(&Region::North);
            let category = *Category::ALL.choose(rng).unwrap_or(&Category::Electronics);
            let units_sold = rng.gen_range(UNITS_RANGE);
            let price_per_unit = rng.gen_range(PRICE_RANGE);

            let sales_noise: f64 = rng.sample::<f64, _>(StandardNormal) * SALES_NOISE_SIGMA;
            let sales = f64::from(units_sold) * price_per_unit + sales_noise;

            let margin = rng.gen_range(MARGIN_RANGE);
            let profit_noise: f64 = rng.sample::<f64, _>(StandardNormal) * PROFIT_NOISE_SIGMA;
            let profit = (sales * margin - profit_noise).max(PROFIT_FLOOR);

            SalesRecord {
                date,
                region,
                category,
                units_sold,
                price_per_unit,
                sales,
                profit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_stay_inside_span() {
        let config = GeneratorConfig {
            samples: 500,
            ..Default::default()
        };
        let end = config.start_date + Duration::days(i64::from(config.span_days));
        for r in generate(&config) {
            assert!(r.date >= config.start_date && r.date < end, "date {} out of span", r.date);
        }
    }

    #[test]
    fn zero_span_collapses_to_start_date() {
        let config = GeneratorConfig {
            samples: 10,
            span_days: 0,
            ..Default::default()
        };
        assert!(generate(&config).iter().all(|r| r.date == config.start_date));
    }

    #[test]
    fn units_and_prices_within_bounds() {
        let records = generate(&GeneratorConfig::default());
        for r in &records {
            assert!((1..20).contains(&r.units_sold));
            assert!(r.price_per_unit >= 10.0 && r.price_per_unit < 500.0);
        }
    }
}
