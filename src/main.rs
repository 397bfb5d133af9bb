//! crm-browser - Main Entry Point
//!
//! Fetches one CRM collection and prints a single page of it.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crm_browser::cli::{CliArgs, render_json, render_table};
use crm_browser::config::AppConfig;
use crm_browser::domain::filter_schema;
use crm_browser::helpers::get_or_create_data_dir;
use crm_browser::services::{DataSource, HttpDataSource};
use crm_browser::state::RecordBrowser;

/// Stderr output plus a daily log file in the data directory.
///
/// The returned guard flushes the file writer on drop.
fn init_tracing(level: &str) -> Option<WorkerGuard> {
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter());

    let (file_layer, guard) = match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join("logs"), "crm-browser.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter());
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let _guard = init_tracing(args.log_level());

    if args.filter_schema {
        println!("{}", serde_json::to_string_pretty(&filter_schema())?);
        return Ok(());
    }
    let entity = args.entity.context("An entity type is required")?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => AppConfig::default_path()?,
    };
    let mut config = AppConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(token) = &args.token {
        config.api.token = Some(token.clone());
    }
    if let Some(page_size) = args.page_size {
        config.browser.page_size = page_size;
    }
    if args.save_config {
        config.save(&config_path)?;
    }

    let filters = args.filters()?;

    let source = HttpDataSource::new(&config.api)?;
    let credential = config.credential();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let records = runtime
        .block_on(source.fetch_all(entity, &credential))
        .with_context(|| format!("Failed to fetch {}", entity.collection()))?;

    let mut browser = RecordBrowser::for_entity(entity, config.browser.page_size);
    browser.set_records(records);
    if let Some(search) = &args.search {
        browser.set_search_text(search.as_str());
    }
    browser.set_filters(filters);
    if let Some(spec) = args.sort_spec() {
        if !browser.set_sort(spec.clone()) {
            anyhow::bail!(
                "'{}' is not sortable for {}; sortable fields: {}",
                spec.field,
                entity.collection(),
                browser.accessor().sortable_fields().join(", ")
            );
        }
    }
    browser.set_page(args.page);

    if args.json {
        println!("{}", render_json(&browser)?);
    } else {
        print!("{}", render_table(&browser));
    }
    Ok(())
}
