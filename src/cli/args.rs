use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::domain::{EntityType, FilterCondition, SortSpec, validate_filters};
use crate::error::{Error, Result};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "crm-browser",
    version,
    about = "Browse CRM records with search, filters, sorting and pagination",
    long_about = "Fetches one CRM collection and prints a single page of it.\n\nExamples:\n  crm-browser contacts -s acme\n  crm-browser deals -f '{\"field\":\"probability\",\"operator\":\"between\",\"value\":[40,80]}' --sort amount --desc\n  crm-browser companies -p 3 -n 25 --json\n  crm-browser --filter-schema"
)]
pub struct CliArgs {
    #[arg(
        value_name = "ENTITY",
        required_unless_present = "filter_schema",
        help = "Entity type: contacts, companies, deals, leads or tasks."
    )]
    pub entity: Option<EntityType>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "View",
        help = "Case-insensitive free-text search."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'f',
        long = "filter",
        value_name = "JSON",
        action = ArgAction::Append,
        help_heading = "View",
        help = "Filter condition as JSON (repeatable, combined with AND)."
    )]
    pub filter: Vec<String>,

    #[arg(long = "sort", value_name = "FIELD", help_heading = "View", help = "Sort by a sortable column.")]
    pub sort: Option<String>,

    #[arg(long = "desc", requires = "sort", help_heading = "View", help = "Sort descending.")]
    pub desc: bool,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "PAGE",
        default_value_t = 1,
        help_heading = "View",
        help = "Page to show (clamped to the last page)."
    )]
    pub page: usize,

    #[arg(
        short = 'n',
        long = "page-size",
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        help_heading = "View",
        help = "Rows per page (defaults to the config value)."
    )]
    pub page_size: Option<usize>,

    #[arg(long = "json", help_heading = "Output", help = "Print the page as JSON.")]
    pub json: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "filter-schema",
        help_heading = "Output",
        help = "Print the JSON Schema of a filter list and exit."
    )]
    pub filter_schema: bool,

    #[arg(
        long = "config",
        value_name = "FILE",
        help_heading = "Connection",
        help = "Path to config file (defaults to the platform config directory)."
    )]
    pub config: Option<PathBuf>,

    #[arg(long = "base-url", value_name = "URL", help_heading = "Connection", help = "CRM API base URL.")]
    pub base_url: Option<String>,

    #[arg(
        long = "token",
        value_name = "TOKEN",
        env = "CRM_API_TOKEN",
        hide_env_values = true,
        help_heading = "Connection",
        help = "API bearer token."
    )]
    pub token: Option<String>,

    #[arg(
        long = "save-config",
        help_heading = "Connection",
        help = "Write --base-url, --token and --page-size back to the config file."
    )]
    pub save_config: bool,
}

impl CliArgs {
    /// Parse and validate every `--filter` value
    pub fn filters(&self) -> Result<Vec<FilterCondition>> {
        let filters = self
            .filter
            .iter()
            .map(|raw| {
                serde_json::from_str(raw).map_err(|e| Error::Invalid {
                    message: format!("Bad --filter '{raw}': {e}"),
                })
            })
            .collect::<Result<Vec<FilterCondition>>>()?;
        validate_filters(&filters)?;
        Ok(filters)
    }

    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort.as_ref().map(|field| {
            if self.desc {
                SortSpec::desc(field.as_str())
            } else {
                SortSpec::asc(field.as_str())
            }
        })
    }

    /// Log level directive for `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Operator, SortDirection};

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("crm-browser").chain(args.iter().copied())).expect("parse")
    }

    #[test]
    fn test_entity_and_view_flags() {
        let args = parse(&["deals", "-s", "acme", "--sort", "amount", "--desc", "-p", "3", "-n", "5"]);
        assert_eq!(args.entity, Some(EntityType::Deal));
        assert_eq!(args.search.as_deref(), Some("acme"));
        assert_eq!(args.page, 3);
        assert_eq!(args.page_size, Some(5));
        let sort = args.sort_spec().expect("sort");
        assert_eq!(sort.field, "amount");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_filters_parse_and_validate() {
        let args = parse(&[
            "deals",
            "-f",
            r#"{"field":"probability","operator":"between","value":[40,80]}"#,
            "-f",
            r#"{"field":"stage","operator":"is_not_null"}"#,
        ]);
        let filters = args.filters().expect("filters");
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].operator, Operator::Between);

        let bad = parse(&["deals", "-f", r#"{"field":"amount","operator":"between","value":5}"#]);
        assert!(matches!(bad.filters(), Err(Error::InvalidFilter { .. })));

        let garbage = parse(&["deals", "-f", "not json"]);
        assert!(matches!(garbage.filters(), Err(Error::Invalid { .. })));
    }

    #[test]
    fn test_entity_required_unless_schema() {
        assert!(CliArgs::try_parse_from(["crm-browser"]).is_err());
        let args = parse(&["--filter-schema"]);
        assert!(args.filter_schema);
        assert!(args.entity.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(CliArgs::try_parse_from(["crm-browser", "tasks", "-n", "0"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["leads"]).log_level(), "info");
        assert_eq!(parse(&["leads", "-vv"]).log_level(), "trace");
    }
}
