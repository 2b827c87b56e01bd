// ==========================================
// 实验室试剂库存管理 - 命令行入口
// ==========================================
// 流程: 加载配置 → 导入文件 → 筛选/排序/分页 → 输出 JSON
// 日志输出到 stderr，结果输出到 stdout
// ==========================================

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use lab_inventory::domain::types::parse_date;
use lab_inventory::{
    i18n, list_records, logging, ConfigManager, FilterSet, FilterValue, FilterValues,
    InventorySummary, ListQuery, NameCollator, RankedRecord, RankingEngine, RecordImporter,
    SortStrategy,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Entity {
    Reagent,
    Member,
}

#[derive(Parser, Debug)]
#[command(
    name = "lab-inventory",
    about = "Filter, rank and page laboratory inventory records from a CSV/Excel file",
    version
)]
struct Cli {
    /// CSV / XLSX / XLS file to load
    input: PathBuf,

    /// Record type contained in the file
    #[arg(long, value_enum, default_value_t = Entity::Reagent)]
    entity: Entity,

    /// Sort strategy: "smart" or "<field>_<asc|desc>" (defaults to the configured strategy)
    #[arg(long)]
    sort: Option<SortStrategy>,

    /// Filter value, e.g. --filter search=acid --filter dangerLevel=高
    #[arg(long = "filter", value_name = "ID=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Date range filter, e.g. --date-range expiryDate=2026-01-01..2026-12-31
    #[arg(long = "date-range", value_name = "ID=FROM..TO", value_parser = parse_date_range)]
    date_ranges: Vec<(String, NaiveDate, NaiveDate)>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Page size (defaults to the configured page size)
    #[arg(long)]
    page_size: Option<usize>,

    /// Explicit config file (otherwise $LAB_INVENTORY_CONFIG or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override "today" for expiry calculations (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Output locale: zh-CN or en
    #[arg(long)]
    locale: Option<String>,

    /// Attach the smart sort keys of every returned record
    #[arg(long)]
    explain: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", raw))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("empty filter id in '{}'", raw));
    }
    Ok((id.to_string(), value.to_string()))
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{}'", raw))
}

fn parse_date_range(raw: &str) -> Result<(String, NaiveDate, NaiveDate), String> {
    let (id, range) = parse_filter(raw)?;
    let (from, to) = range
        .split_once("..")
        .ok_or_else(|| format!("expected FROM..TO, got '{}'", range))?;
    Ok((id, parse_day(from)?, parse_day(to)?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", lab_inventory::APP_NAME, lab_inventory::VERSION);

    let manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    let config = manager.config();
    match manager.source() {
        Some(path) => tracing::info!(path = %path.display(), "使用配置文件"),
        None => tracing::info!("使用默认配置"),
    }

    let locale = cli.locale.as_deref().unwrap_or(&config.locale);
    if !i18n::SUPPORTED_LOCALES.contains(&locale) {
        return Err(anyhow!("unsupported locale: {}", locale));
    }
    i18n::set_locale(locale);

    let engine = match cli.today {
        Some(today) => RankingEngine::from_config(config, today),
        None => RankingEngine::for_today(config),
    }
    .with_collator(NameCollator::for_locale(locale));

    let mut filters = FilterValues::new();
    for (id, value) in &cli.filters {
        filters.set(id.as_str(), FilterValue::Text(value.clone()));
    }
    for (id, from, to) in &cli.date_ranges {
        filters.set(
            id.as_str(),
            FilterValue::DateRange {
                from: Some(*from),
                to: Some(*to),
            },
        );
    }

    let query = ListQuery {
        filters,
        strategy: cli
            .sort
            .clone()
            .unwrap_or_else(|| config.default_strategy.clone()),
        page: cli.page,
        page_size: cli.page_size.unwrap_or(config.page_size),
    };

    let importer = RecordImporter::new();
    let output = match cli.entity {
        Entity::Reagent => {
            let report = importer.import_reagents(&cli.input)?;
            let filter_set = FilterSet::reagent_default().override_search_fields(&config.search_fields);
            render(&engine, &filter_set, report, &query, cli.explain)?
        }
        Entity::Member => {
            let report = importer.import_members(&cli.input)?;
            let filter_set = FilterSet::member_default().override_search_fields(&config.search_fields);
            render(&engine, &filter_set, report, &query, cli.explain)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn render<R: RankedRecord + Clone + Serialize>(
    engine: &RankingEngine,
    filter_set: &FilterSet,
    report: lab_inventory::ImportReport<R>,
    query: &ListQuery,
    explain: bool,
) -> anyhow::Result<serde_json::Value> {
    let loaded = report.records.len().to_string();
    tracing::info!(
        "{}",
        i18n::t_with_args("import.loaded", &[("count", loaded.as_str())])
    );

    let summary = InventorySummary::from_records(&report.records, engine);
    for line in summary.lines() {
        eprintln!("{}", line);
    }

    let page = list_records(engine, filter_set, &report.records, query);
    let explanations: Option<Vec<serde_json::Value>> =
        explain.then(|| page.items.iter().map(|r| engine.explain(r)).collect());

    Ok(json!({
        "strategy": query.strategy,
        "strategyTitle": query.strategy.title(),
        "summary": summary,
        "rejected": report.rejected,
        "page": serde_json::to_value(&page)?,
        "explain": explanations,
    }))
}
