// ==========================================
// 可生产订单分析 - 命令行入口
// ==========================================
// 流程: 配置 → 加载数据集 → 分析 → 摘要输出 → 报表导出
// 退出码: 0 成功 / 1 运行错误 / 2 物料编码未映射
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use producible_orders::config::config_keys;
use producible_orders::{
    export_report, logging, AnalysisOptions, AnalysisOrchestrator, AnalysisReport,
    ConfigManager, DatasetLoader, DemandTier, InputPaths, APP_NAME, VERSION,
};
use std::path::PathBuf;

const EXIT_UNRESOLVED: i32 = 2;

#[derive(Parser)]
#[command(name = "producible-orders")]
#[command(about = "Decide which orders can be produced from current inventory", long_about = None)]
#[command(version)]
struct Cli {
    /// Material equivalence table (scheme A ↔ scheme B)
    #[arg(long, value_name = "FILE")]
    equivalence: PathBuf,

    /// On-hand inventory report (MB52)
    #[arg(long, value_name = "FILE")]
    inventory: PathBuf,

    /// Firm orders report (COOIS)
    #[arg(long, value_name = "FILE")]
    firm: PathBuf,

    /// Forecast orders report (ZCO41)
    #[arg(long, value_name = "FILE")]
    forecast: PathBuf,

    /// JSON config file (defaults to the user config directory if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the CSV/JSON reports
    #[arg(long = "out-dir", value_name = "DIR", default_value = "output")]
    out_dir: PathBuf,

    /// Reference date for past-due evaluation (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Print the full report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn load_config(cli: &Cli) -> Result<ConfigManager> {
    let mut config = match &cli.config {
        Some(path) => ConfigManager::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigManager::load_default().context("failed to load default config")?,
    };

    if let Some(today) = cli.today {
        config.set(config_keys::ANALYSIS_TODAY, today.format("%Y-%m-%d").to_string());
    }
    for key in config.unknown_keys() {
        tracing::warn!(key, "未识别的配置键");
    }
    Ok(config)
}

fn print_summary(report: &AnalysisReport) {
    let (firm_ok, firm_nok) = report.order_counts(DemandTier::Firm);
    let (forecast_ok, forecast_nok) = report.order_counts(DemandTier::Forecast);

    println!("{} v{}  run {}", APP_NAME, VERSION, report.run_id);
    println!("  materials            {}", report.availability.len());
    println!("  firm orders          {} ok / {} short", firm_ok, firm_nok);
    println!("  forecast orders      {} ok / {} short", forecast_ok, forecast_nok);
    println!(
        "  past due (short)     firm {} / forecast {}",
        report.firm_past_due.len(),
        report.forecast_past_due.len()
    );
    println!(
        "  data quality         {} rows, {} excluded, {} warnings",
        report.dq_report.summary.total_rows,
        report.dq_report.summary.excluded,
        report.dq_report.summary.warning
    );
    for shortage in report.material_shortages.iter().take(5) {
        println!(
            "  short: {:<30} {}",
            shortage.material_id, shortage.shortage_qty
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        logging::init_with_level("debug");
    } else {
        logging::init();
    }

    let config = load_config(&cli)?;
    let options = AnalysisOptions {
        today: config
            .today()
            .context("invalid analysis.today")?
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        ss_suffix: config.ss_suffix(),
    };

    let paths = InputPaths {
        equivalence: cli.equivalence.clone(),
        inventory: cli.inventory.clone(),
        firm: cli.firm.clone(),
        forecast: cli.forecast.clone(),
    };
    let dataset = DatasetLoader::new(&config)
        .load(&paths)
        .context("failed to load input data")?;

    let report = match AnalysisOrchestrator::new(options).run(&dataset) {
        Ok(report) => report,
        Err(err) => {
            // 未映射编码：输出完整报告，不导出任何结果
            if let Some(validation) = err.validation_report() {
                eprintln!("{}", validation);
                std::process::exit(EXIT_UNRESOLVED);
            }
            return Err(err).context("analysis failed");
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else {
        print_summary(&report);
    }

    let written = export_report(&report, &cli.out_dir)
        .with_context(|| format!("failed to write reports to {}", cli.out_dir.display()))?;
    tracing::info!(files = written.len(), dir = %cli.out_dir.display(), "完成");

    Ok(())
}
