// Dashboard HTML page
//
// Rendered once at startup; dropdown options come from the loaded dataset.

use salescope_core::query::ALL;
use salescope_core::Dataset;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Interactive Sales Performance Dashboard</title>
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
</head>
<body class="min-h-screen bg-gray-100 p-8 flex flex-col items-center font-sans" style="font-family: Inter, sans-serif">
<div class="w-full max-w-6xl bg-white shadow-xl rounded-lg p-6 mb-8 text-center">
  <h1 class="text-4xl font-extrabold text-gray-800 mb-2">Interactive Sales Performance Dashboard</h1>
  <p class="text-lg text-gray-600">Analyze sales trends, product performance, and regional profitability.</p>
</div>
"#;

const CHARTS: &str = r#"<div class="w-full max-w-6xl grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
  <div class="bg-white shadow-lg rounded-lg p-4">
    <h3 class="text-xl font-semibold text-gray-800 mb-4 text-center">Sales Over Time</h3>
    <div id="sales-over-time-chart" class="h-[300px]"></div>
  </div>
  <div class="bg-white shadow-lg rounded-lg p-4">
    <h3 class="text-xl font-semibold text-gray-800 mb-4 text-center">Sales by Product Category</h3>
    <div id="sales-by-category-chart" class="h-[300px]"></div>
  </div>
  <div class="bg-white shadow-lg rounded-lg p-4">
    <h3 class="text-xl font-semibold text-gray-800 mb-4 text-center">Profit by Region</h3>
    <div id="profit-by-region-chart" class="h-[300px]"></div>
  </div>
</div>
<div class="w-full max-w-6xl mt-8 text-center text-gray-500 text-sm">
  <p>Dashboard served by Salescope with Plotly.js and Tailwind CSS for styling.</p>
</div>
"#;

const SCRIPT: &str = r#"<script>
const region = document.getElementById("region-dropdown");
const category = document.getElementById("category-dropdown");
const config = { responsive: true, displaylogo: false };

async function refresh() {
  const params = new URLSearchParams({ region: region.value, category: category.value });
  const res = await fetch("/api/charts?" + params.toString());
  if (!res.ok) {
    console.error("chart update failed", res.status, await res.text());
    return;
  }
  const charts = await res.json();
  Plotly.react("sales-over-time-chart", charts.sales_over_time.data, charts.sales_over_time.layout, config);
  Plotly.react("sales-by-category-chart", charts.sales_by_category.data, charts.sales_by_category.layout, config);
  Plotly.react("profit-by-region-chart", charts.profit_by_region.data, charts.profit_by_region.layout, config);
}

region.addEventListener("change", refresh);
category.addEventListener("change", refresh);
refresh();
</script>
</body>
</html>
"#;

/// Build the full page for a dataset.
pub fn render_index(dataset: &Dataset) -> String {
    let regions: Vec<&str> = dataset.regions().iter().map(|r| r.as_str()).collect();
    let categories: Vec<&str> = dataset.categories().iter().map(|c| c.as_str()).collect();

    let mut html = String::with_capacity(HEAD.len() + CHARTS.len() + SCRIPT.len() + 2048);
    html.push_str(HEAD);
    html.push_str(
        r#"<div class="w-full max-w-6xl bg-white shadow-lg rounded-lg p-6 mb-8 flex flex-wrap justify-center gap-6">
"#,
    );
    push_dropdown(
        &mut html,
        "region-dropdown",
        "Filter by Region:",
        "All Regions",
        &regions,
    );
    push_dropdown(
        &mut html,
        "category-dropdown",
        "Filter by Product Category:",
        "All Categories",
        &categories,
    );
    html.push_str("</div>\n");
    html.push_str(CHARTS);
    html.push_str(SCRIPT);
    html
}

fn push_dropdown(html: &mut String, id: &str, label: &str, all_label: &str, values: &[&str]) {
    html.push_str(&format!(
        "  <div class=\"flex-1 min-w-[250px]\">\n    <label for=\"{id}\" class=\"block text-gray-700 text-md font-medium mb-2\">{label}</label>\n    <select id=\"{id}\" class=\"w-full rounded-md shadow-sm border border-gray-300 p-2\">\n"
    ));
    html.push_str(&format!(
        "      <option value=\"{ALL}\" selected>{all_label}</option>\n"
    ));
    for v in values {
        html.push_str(&format!("      <option value=\"{v}\">{v}</option>\n"));
    }
    html.push_str("    </select>\n  </div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use salescope_core::{generate, GeneratorConfig};

    #[test]
    fn page_lists_dataset_values_after_all_sentinel() {
        let dataset = Dataset::new(generate(&GeneratorConfig {
            samples: 300,
            ..Default::default()
        }));
        let html = render_index(&dataset);
        assert!(html.contains(r#"<option value="All" selected>All Regions</option>"#));
        assert!(html.contains(r#"<option value="All" selected>All Categories</option>"#));
        assert!(html.contains(r#"<option value="Home Goods">Home Goods</option>"#));
        let first_region = dataset.regions()[0];
        let all_pos = html.find("All Regions").unwrap();
        let first_pos = html
            .find(&format!(r#"<option value="{}">"#, first_region))
            .unwrap();
        assert!(all_pos < first_pos);
    }

    #[test]
    fn empty_dataset_still_renders_controls() {
        let html = render_index(&Dataset::default());
        assert!(html.contains("region-dropdown"));
        assert!(html.contains("category-dropdown"));
        assert!(!html.contains(r#"<option value="North">"#));
    }
}
