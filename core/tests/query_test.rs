use salescope_core::{
    generate, query, Category, ChartSet, DashboardView, Dataset, FilterState, GeneratorConfig,
    Region, Selection,
};

fn dataset() -> Dataset {
    Dataset::new(generate(&GeneratorConfig {
        samples: 2000,
        ..Default::default()
    }))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

#[test]
fn all_filter_returns_every_row_in_order() {
    let data = dataset();
    let rows = FilterState::default().apply(&data);
    assert_eq!(rows.len(), data.len());
    for (a, b) in rows.iter().zip(data.records()) {
        assert_eq!(*a, b);
    }
}

#[test]
fn region_filter_returns_only_that_region() {
    let data = dataset();
    for region in Region::ALL {
        let filter = FilterState::new(Selection::Only(region), Selection::All);
        let rows = filter.apply(&data);
        assert!(rows.iter().all(|r| r.region == region));
        let expected = data.records().iter().filter(|r| r.region == region).count();
        assert_eq!(rows.len(), expected);
    }
}

#[test]
fn combined_filter_matches_both_fields() {
    let data = dataset();
    let filter = FilterState::new(
        Selection::Only(Region::East),
        Selection::Only(Category::HomeGoods),
    );
    let rows = filter.apply(&data);
    assert!(!rows.is_empty());
    assert!(rows
        .iter()
        .all(|r| r.region == Region::East && r.category == Category::HomeGoods));
}

#[test]
fn aggregate_totals_equal_column_sums() {
    let data = dataset();
    let filters = [
        FilterState::default(),
        FilterState::new(Selection::Only(Region::North), Selection::All),
        FilterState::new(Selection::All, Selection::Only(Category::Food)),
        FilterState::new(Selection::Only(Region::West), Selection::Only(Category::Books)),
    ];
    for filter in filters {
        let rows = filter.apply(&data);
        let sales: f64 = rows.iter().map(|r| r.sales).sum();
        let profit: f64 = rows.iter().map(|r| r.profit).sum();

        let view = DashboardView::compute(&data, &filter);
        assert_eq!(view.rows, rows.len());
        let monthly: f64 = view.monthly_sales.iter().map(|m| m.sales).sum();
        let by_category: f64 = view.sales_by_category.iter().map(|g| g.total).sum();
        let by_region: f64 = view.profit_by_region.iter().map(|g| g.total).sum();
        assert!(close(monthly, sales), "{:?}: {} vs {}", filter, monthly, sales);
        assert!(close(by_category, sales), "{:?}: {} vs {}", filter, by_category, sales);
        assert!(close(by_region, profit), "{:?}: {} vs {}", filter, by_region, profit);
    }
}

#[test]
fn monthly_sales_is_chronological_without_duplicates() {
    let data = dataset();
    let view = DashboardView::compute(&data, &FilterState::default());
    // Two years of dates starting 2022-01-01.
    assert_eq!(view.monthly_sales.len(), 24);
    for pair in view.monthly_sales.windows(2) {
        assert!(pair[0].month_end < pair[1].month_end);
    }
}

#[test]
fn category_sales_sorted_descending() {
    let data = dataset();
    let view = DashboardView::compute(
        &data,
        &FilterState::new(Selection::Only(Region::South), Selection::All),
    );
    assert_eq!(view.sales_by_category.len(), Category::ALL.len());
    for pair in view.sales_by_category.windows(2) {
        assert!(pair[0].total >= pair[1].total);
    }
}

#[test]
fn filter_with_no_rows_yields_empty_charts() {
    let data = Dataset::new(
        generate(&GeneratorConfig {
            samples: 200,
            ..Default::default()
        })
        .into_iter()
        .filter(|r| r.region != Region::Central)
        .collect(),
    );
    let filter = FilterState::new(Selection::Only(Region::Central), Selection::All);
    let view = DashboardView::compute(&data, &filter);
    assert_eq!(view.rows, 0);
    assert!(view.monthly_sales.is_empty());
    assert!(view.sales_by_category.is_empty());
    assert!(view.profit_by_region.is_empty());

    let charts = ChartSet::from_view(&view);
    assert!(charts.sales_by_category.data.is_empty());
}

#[test]
fn chart_set_follows_aggregates() {
    let data = dataset();
    let filter = FilterState::new(Selection::All, Selection::Only(Category::Electronics));
    let charts = ChartSet::render(&data, &filter);
    let value = serde_json::to_value(&charts).unwrap();

    let bars = value["sales_by_category"]["data"].as_array().unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0]["name"], "Electronics");

    let rows = filter.apply(&data);
    let expected = query::profit_by_region(&rows);
    let labels = value["profit_by_region"]["data"][0]["labels"].as_array().unwrap();
    assert_eq!(labels.len(), expected.len());
    assert_eq!(labels[0], expected[0].key.as_str());
}
