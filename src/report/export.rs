use base64::{engine::general_purpose::STANDARD, Engine};

use crate::chart::Figure;
use crate::error::{DashError, Result};
use crate::stats::{format_value, SummaryTable};
use crate::update::Update;

use super::raster::Rasterize;

/// File name offered when the report is saved.
pub const REPORT_FILE_NAME: &str = "rawdata.html";

const HTML_URI_PREFIX: &str = "data:text/html;base64,";
const PNG_URI_PREFIX: &str = "data:image/png;base64,";

/// Build the `data:` URI of the report for the shown statistics and chart.
///
/// Nothing to export while the table is empty. A chart that fails to render
/// is left out and the table is still exported.
pub fn build_export_link(
    table: &SummaryTable,
    figure: Option<&Figure>,
    rasterizer: &impl Rasterize,
) -> Update<String> {
    if table.is_empty() {
        log::debug!("No statistics yet, keeping the current download link");
        return Update::Unchanged;
    }

    let document = render_document(table, figure, rasterizer);
    let link = format!("{HTML_URI_PREFIX}{}", STANDARD.encode(document));
    log::debug!("Generated download link ({} bytes)", link.len());
    Update::Set(link)
}

/// The report as one HTML document: the table, then the chart image.
pub fn render_document(
    table: &SummaryTable,
    figure: Option<&Figure>,
    rasterizer: &impl Rasterize,
) -> String {
    let img_tag = match figure.map(|fig| rasterizer.rasterize(fig)) {
        Some(Ok(png)) => format!(r#"<img src="{PNG_URI_PREFIX}{}" />"#, STANDARD.encode(png)),
        Some(Err(e)) => {
            log::warn!("Exporting statistics without chart: {e}");
            String::new()
        }
        None => String::new(),
    };
    format!("<html><body>{}<br>{img_tag}</body></html>", html_table(table))
}

/// Render `table` as an HTML table with a header row.
pub fn html_table(table: &SummaryTable) -> String {
    let mut out = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n");
    out.push_str("    <tr style=\"text-align: right;\">\n");
    for name in table.header() {
        out.push_str(&format!("      <th>{}</th>\n", escape_html(name)));
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in &table.rows {
        out.push_str("    <tr>\n");
        out.push_str(&format!("      <td>{}</td>\n", escape_html(row.statistic)));
        for value in &row.values {
            out.push_str(&format!("      <td>{}</td>\n", format_value(*value)));
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Recover the HTML document from a link made by [`build_export_link`].
pub fn decode_export_link(link: &str) -> Result<Vec<u8>> {
    let payload = link
        .strip_prefix(HTML_URI_PREFIX)
        .ok_or_else(|| DashError::Render("not an HTML data link".to_string()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| DashError::Render(format!("invalid report payload: {e}")))
}
