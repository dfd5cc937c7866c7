//! Search command handler.

use super::OutputFormat;
use clap::Args;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use weft::{
    ClientConfig, DataTable, DataTableConfigBuilder, HttpSearchBackend, QueryState, Row,
    SortOrder, SortSpec, TracingNotifier,
};

/// Arguments of the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Index to search (e.g. material, order, supplier)
    #[arg(long)]
    pub index: String,

    /// Free-text query
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Exact-match filter as key=value; the value is parsed as JSON when it can be
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort key as field or field:desc, highest priority first
    #[arg(long = "sort", value_name = "FIELD[:asc|desc]")]
    pub sort: Vec<String>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Rows per page
    #[arg(long, default_value_t = weft::DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Base URL of the search service, overriding the configuration
    #[arg(long, env = "WEFT_BASE_URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Parse `key=value` filters; values that are not valid JSON are taken as strings.
pub fn parse_filters(raw: &[String]) -> anyhow::Result<BTreeMap<String, Value>> {
    raw.iter()
        .map(|entry| {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("filter '{}' is not KEY=VALUE", entry))?;
            let value = serde_json::from_str(value).unwrap_or_else(|_| json!(value));
            Ok((key.trim().to_string(), value))
        })
        .collect()
}

/// Parse `field` or `field:order` sort keys.
pub fn parse_sort(raw: &[String]) -> anyhow::Result<Vec<SortSpec>> {
    raw.iter()
        .map(|entry| match entry.split_once(':') {
            Some((field, order)) => {
                let order: SortOrder = order
                    .parse()
                    .map_err(|_| anyhow::anyhow!("unknown sort order '{}'", order))?;
                Ok(SortSpec::new(field, order))
            }
            None => Ok(SortSpec::asc(entry.as_str())),
        })
        .collect()
}

/// Handles the search command.
#[tracing::instrument(skip_all, fields(index = %args.index))]
pub async fn handle_search_command(args: SearchArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let client = ClientConfig::load_with_base_url(config, args.base_url.as_deref())?;

    let table_config = DataTableConfigBuilder::default()
        .index(args.index.as_str())
        .page_size(args.page_size)
        .build()?;
    let table = DataTable::new(Arc::new(HttpSearchBackend::new(&client)?), table_config)
        .with_notifier(Arc::new(TracingNotifier));

    let state = QueryState::new()
        .with_query(args.query.as_str())
        .with_filters(parse_filters(&args.filters)?)
        .with_sort(parse_sort(&args.sort)?);

    let changed = table.apply_query(state).await;
    if !changed {
        table.reload().await;
    }
    if table.cached_pages().is_empty() {
        anyhow::bail!("search on '{}' failed", args.index);
    }

    while table.cached_pages().len() < args.pages as usize && table.has_more() {
        if table.slide_window_down().await.is_none() {
            break;
        }
    }

    tracing::info!(
        total = table.total_count(),
        took_ms = table.took(),
        pages = table.cached_pages().len(),
        rows = table.row_count(),
        "Search complete"
    );

    print_rows(&table, args.format)
}

fn print_rows(table: &DataTable, format: OutputFormat) -> anyhow::Result<()> {
    let rows = table.rows();
    match format {
        OutputFormat::Text => {
            for row in &rows {
                println!(
                    "{}\t{}",
                    row.id().unwrap_or_else(|| "-".to_string()),
                    serde_json::to_string(row.fields())?
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<Map<String, Value>> = rows.into_iter().map(Row::into_inner).collect();
            let document = json!({
                "total": table.total_count(),
                "took": table.took(),
                "pages": table.cached_pages(),
                "rows": rows,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_accepts_json_and_text() {
        let raw = vec![
            "status=active".to_string(),
            "stock=12".to_string(),
            "tags=[\"a\",\"b\"]".to_string(),
        ];

        let filters = parse_filters(&raw).unwrap();

        assert_eq!(filters["status"], json!("active"));
        assert_eq!(filters["stock"], json!(12));
        assert_eq!(filters["tags"], json!(["a", "b"]));
        assert!(parse_filters(&["broken".to_string()]).is_err());
    }

    #[test]
    fn test_parse_sort() {
        let raw = vec!["name".to_string(), "created_at:desc".to_string()];

        let sort = parse_sort(&raw).unwrap();

        assert_eq!(sort, vec![SortSpec::asc("name"), SortSpec::desc("created_at")]);
        assert!(parse_sort(&["name:sideways".to_string()]).is_err());
    }
}
