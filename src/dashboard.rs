//! Self-contained HTML dashboard for the sales analysis.

use std::path::{Path, PathBuf};

use crate::error::{CloseoutError, Result};
use crate::sales::SalesAnalysis;

/// Render the dashboard page. Chart data is embedded as JSON; the charts
/// themselves come from the Plotly CDN so the file works standalone.
pub fn render(analysis: &SalesAnalysis, company_code: &str, period: &str) -> Result<String> {
    let monthly_json = serde_json::to_string(&analysis.monthly_sales)
        .map_err(|e| CloseoutError::Other(e.to_string()))?;
    let growth_json = serde_json::to_string(&analysis.growth_rates)
        .map_err(|e| CloseoutError::Other(e.to_string()))?;
    let quarterly_json = serde_json::to_string(&analysis.quarterly)
        .map_err(|e| CloseoutError::Other(e.to_string()))?;
    let seasonality_json = serde_json::to_string(&analysis.seasonality)
        .map_err(|e| CloseoutError::Other(e.to_string()))?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{period} Sales Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        .header {{ background: #2c3e50; color: white; padding: 20px; border-radius: 10px; }}
        .summary-card {{ background: white; padding: 20px; margin: 20px 0; border-radius: 10px; }}
        .chart-container {{ background: white; padding: 20px; margin: 20px 0; border-radius: 10px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{period} Sales Dashboard</h1>
            <p>Generated by closeout</p>
        </div>

        <div class="summary-card">
            <h3>Summary</h3>
            <p><strong>Company code:</strong> {company_code}</p>
            <p><strong>Period:</strong> {period}</p>
            <p><strong>Files analyzed:</strong> {files_analyzed}</p>
        </div>

        <div class="chart-container">
            <h3>Monthly Sales</h3>
            <div id="trendChart"></div>
        </div>

        <div class="chart-container">
            <h3>Month-over-Month Growth</h3>
            <div id="growthChart"></div>
        </div>

        <div class="chart-container">
            <h3>Quarterly Sales</h3>
            <div id="quarterlyChart"></div>
        </div>

        <div class="chart-container">
            <h3>Seasonality</h3>
            <div id="seasonalityChart"></div>
        </div>
    </div>

    <script>
        const salesData = {monthly_json};
        const growthData = {growth_json};
        const quarterlyData = {quarterly_json};
        const seasonalityData = {seasonality_json};

        Plotly.newPlot('trendChart', [{{
            x: Object.keys(salesData),
            y: Object.values(salesData),
            type: 'scatter',
            mode: 'lines+markers',
            name: 'Monthly sales'
        }}], {{
            title: 'Monthly Sales Trend',
            xaxis: {{ title: 'Month' }},
            yaxis: {{ title: 'Sales' }}
        }});

        Plotly.newPlot('growthChart', [{{
            x: Object.keys(growthData),
            y: Object.values(growthData),
            type: 'bar',
            name: 'Growth %'
        }}], {{
            title: 'Month-over-Month Growth (%)',
            xaxis: {{ title: 'Month' }},
            yaxis: {{ title: '%' }}
        }});

        Plotly.newPlot('quarterlyChart', [{{
            x: Object.keys(quarterlyData),
            y: Object.values(quarterlyData),
            type: 'bar',
            name: 'Quarterly sales'
        }}], {{
            title: 'Quarterly Sales',
            xaxis: {{ title: 'Quarter' }},
            yaxis: {{ title: 'Sales' }}
        }});

        Plotly.newPlot('seasonalityChart', [{{
            x: Object.keys(seasonalityData),
            y: Object.values(seasonalityData),
            type: 'bar',
            name: 'Average by calendar month'
        }}], {{
            title: 'Average Sales by Calendar Month',
            xaxis: {{ title: 'Month of year' }},
            yaxis: {{ title: 'Sales' }}
        }});
    </script>
</body>
</html>
"#,
        period = period,
        company_code = company_code,
        files_analyzed = analysis.files_analyzed,
        monthly_json = monthly_json,
        growth_json = growth_json,
        quarterly_json = quarterly_json,
        seasonality_json = seasonality_json,
    ))
}

/// Write the dashboard into the output directory.
pub fn write(
    analysis: &SalesAnalysis,
    company_code: &str,
    period: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let html = render(analysis, company_code, period)?;
    let path = output_dir.join("sales_dashboard.html");
    std::fs::write(&path, html)?;
    Ok(path)
}
