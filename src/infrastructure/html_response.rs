// HTML page assembly for the dashboard
use crate::domain::chart::TileData;
use crate::domain::dashboard::Dashboard;
use crate::infrastructure::svg_chart::{bar_chart_svg, line_chart_svg};
use axum::response::Html;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1000px; padding: 1.5rem; color: #222; }
.tiles { display: flex; gap: 1rem; margin: 1rem 0; }
.tile { flex: 1; border: 1px solid #ddd; border-radius: 6px; padding: 1rem; }
.tile .title { font-size: 0.9rem; color: #666; }
.tile .value { font-size: 2rem; font-weight: bold; }
.notice { background: #fff4e5; border: 1px solid #f0c36d; padding: 0.75rem; border-radius: 4px; }
.chart svg { width: 100%; height: auto; }
table { border-collapse: collapse; width: 100%; }
td, th { border-bottom: 1px solid #eee; padding: 0.3rem 0.5rem; text-align: left; }
"#;

/// Render the whole dashboard page. `options` populates the region selector.
pub fn dashboard_page(dashboard: &Dashboard, options: &[String]) -> Html<String> {
    let mut page = String::with_capacity(64 * 1024);

    let _ = write!(
        page,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head><body>\
         <h1>{title}</h1>\
         <ul><li>Average and peak unemployment rate for the selection</li>\
         <li>Trend for any state / union territory, with the national trend for reference</li>\
         <li>COVID-19 lockdown start (vertical line)</li>\
         <li>Average unemployment rate per region</li></ul>",
        title = escape_html(&dashboard.title),
    );

    page.push_str(&selector_form(&dashboard.selection, options));

    page.push_str("<div class=\"tiles\">");
    for tile in &dashboard.tiles {
        page.push_str(&tile_html(tile));
    }
    page.push_str("</div>");

    let _ = write!(page, "<h2>{}</h2>", escape_html(&dashboard.trend_chart.title));
    if dashboard.trend_chart.has_selection_data() {
        page.push_str(&chart_html(line_chart_svg(&dashboard.trend_chart), "trend"));
    } else {
        page.push_str("<p class=\"notice\">No data available for the selected region.</p>");
    }

    let _ = write!(page, "<h2>{}</h2>", escape_html(&dashboard.region_chart.title));
    page.push_str(&chart_html(bar_chart_svg(&dashboard.region_chart), "region averages"));
    page.push_str(&ranking_table(dashboard));

    page.push_str("</body></html>");
    Html(page)
}

fn selector_form(selected: &str, options: &[String]) -> String {
    let mut form = String::from(
        "<form method=\"get\" action=\"/\"><label for=\"region\">Select Region </label>\
         <select id=\"region\" name=\"region\" onchange=\"this.form.submit()\">",
    );
    for option in options {
        let marker = if option == selected { " selected" } else { "" };
        let escaped = escape_html(option);
        let _ = write!(form, "<option value=\"{escaped}\"{marker}>{escaped}</option>");
    }
    form.push_str("</select><noscript><button type=\"submit\">Show</button></noscript></form>");
    form
}

fn tile_html(tile: &TileData) -> String {
    format!(
        "<div class=\"tile\" id=\"tile-{}\"><div class=\"title\">{}</div><div class=\"value\">{}</div></div>",
        escape_html(&tile.id),
        escape_html(&tile.title),
        escape_html(&tile.formatted()),
    )
}

fn chart_html(svg: anyhow::Result<String>, name: &str) -> String {
    match svg {
        Ok(svg) => format!("<div class=\"chart\">{svg}</div>"),
        Err(e) => {
            tracing::error!("Failed to draw {} chart: {:#}", name, e);
            "<p class=\"notice\">Chart unavailable.</p>".to_string()
        }
    }
}

fn ranking_table(dashboard: &Dashboard) -> String {
    let mut table = String::from("<table><tr><th>#</th><th>Region</th><th>Average</th></tr>");
    for (rank, bar) in dashboard.region_chart.bars.iter().enumerate() {
        let _ = write!(
            table,
            "<tr><td>{}</td><td><a href=\"/?region={}\">{}</a></td><td>{:.2}{}</td></tr>",
            rank + 1,
            urlencoding::encode(&bar.label),
            escape_html(&bar.label),
            bar.value,
            escape_html(&dashboard.region_chart.unit),
        );
    }
    table.push_str("</table>");
    table
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::test_support::sample_dataset;
    use crate::domain::unemployment::SelectionState;
    use crate::infrastructure::config::DashboardSettings;
    use std::sync::Arc;

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(sample_dataset()), DashboardSettings::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_page_marks_selected_option_and_kpis() {
        let service = service();
        let dashboard = service.render(&SelectionState::Region("West Bengal".to_string()));
        let Html(page) = dashboard_page(&dashboard, &service.selectable_regions());

        assert!(page.contains("<option value=\"West Bengal\" selected>West Bengal</option>"));
        assert!(page.contains("<option value=\"All\">All</option>"));
        assert!(page.contains("7.00%"));
        assert!(page.contains("9.00%"));
        assert!(page.contains("<svg"));
        assert!(page.contains("href=\"/?region=West%20Bengal\""));
    }

    #[test]
    fn test_page_for_region_without_data() {
        let service = service();
        let dashboard = service.render(&SelectionState::Region("Goa".to_string()));
        let Html(page) = dashboard_page(&dashboard, &service.selectable_regions());

        assert!(page.contains("No data available for the selected region."));
        assert!(page.contains("N/A"));
    }
}
