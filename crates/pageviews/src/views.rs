use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use pageviews_core::pageviews::{ViewCountOutput, ViewCountQuery};

use crate::client::PageviewsClient;
use crate::error::ViewCountError;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ViewsOptions {
    /// Article title as it appears in the page URL (e.g. "Node.js")
    #[arg(value_name = "ARTICLE")]
    pub article: String,

    /// Month in YYYYMM format (e.g. 202401)
    #[arg(value_name = "MONTH")]
    pub month: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ViewsOptions, global: crate::Global) -> Result<()> {
    let client = PageviewsClient::from_global(&global)?;

    if global.verbose {
        eprintln!("Pageviews API Base: {}", client.api_base());
        eprintln!();
    }

    let output = client
        .view_count_data(ViewCountQuery {
            article: Some(options.article.clone()),
            month: Some(options.month.clone()),
        })
        .await
        .map_err(lookup_error)?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output);
    }

    Ok(())
}

fn lookup_error(err: ViewCountError) -> color_eyre::eyre::Report {
    match &err {
        ViewCountError::Upstream(upstream) => {
            eyre!("{} (status {})", upstream, upstream.status_code())
        }
        ViewCountError::Query(_) => eyre!("{}", err),
    }
}

fn output_json(output: &ViewCountOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

fn output_formatted(output: &ViewCountOutput) {
    let mut table = new_table();
    table.add_row(prettytable::row!["Article".bold(), output.article.cyan()]);
    table.add_row(prettytable::row!["Month".bold(), format_month(&output.month)]);
    table.add_row(prettytable::row![
        "Views".bold(),
        group_thousands(output.view_count).green().bold()
    ]);
    table.printstd();
}

/// Render `YYYYMM` as `YYYY-MM`
fn format_month(month: &str) -> String {
    if month.len() == 6 {
        f!("{}-{}", &month[..4], &month[4..])
    } else {
        month.to_string()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageviews_core::pageviews::{QueryError, UpstreamError};

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("202401"), "2024-01");
        assert_eq!(format_month("2024"), "2024");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_lookup_error_query() {
        let report = lookup_error(ViewCountError::Query(QueryError::InvalidMonth));
        assert_eq!(
            report.to_string(),
            "Article name and a valid month in YYYYMM format are required."
        );
    }

    #[test]
    fn test_lookup_error_upstream_includes_status() {
        let report = lookup_error(ViewCountError::Upstream(UpstreamError::Rejected {
            status: 404,
            detail: Some("Page not found".to_string()),
        }));
        assert_eq!(report.to_string(), "Page not found (status 404)");
    }
}
