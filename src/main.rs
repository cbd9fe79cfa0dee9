use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use core_types::{CategoryKind, Scope};
use kpi_engine::{SummaryOrder, TrendMetric};
use record_store::{DbRepository, InMemoryStore, RecordSource, connect};
use reporting::ReportService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The main entry point for the finsight reporting CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file when one is present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = configuration::load_config()?;
    let source = resolve_source(&cli).await?;
    let service = ReportService::new(source, config);
    let scope = cli.scope.to_scope()?;

    let result = match cli.command {
        Commands::Summary { latest_first } => {
            let order = if latest_first {
                SummaryOrder::MostRecentFirst
            } else {
                SummaryOrder::Chronological
            };
            service
                .executive_summary(&scope, order)
                .await
                .map(render_summaries)
        }
        Commands::Margins => service.margin_analysis(&scope).await.map(render_summaries),
        Commands::Goals => service.revenue_vs_goal(&scope).await.map(render_goals),
        Commands::Expenses => service
            .expense_by_category(&scope)
            .await
            .map(render_expenses),
        Commands::Trends { metric } => service
            .trend_series(&scope, metric.into())
            .await
            .map(render_trends),
        Commands::Counterparties { side, limit } => service
            .counterparty_analysis(&scope, side.into(), limit)
            .await
            .map(render_counterparties),
    };

    match result {
        Ok(table) => println!("{table}"),
        // No data in scope is an expected condition, not a failure.
        Err(e) if e.is_empty_scope() => println!("No records matched scope: {scope}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Executive financial KPI reports from ledger records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    scope: ScopeArgs,

    /// Read records from a JSON snapshot file instead of PostgreSQL.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Args)]
struct ScopeArgs {
    /// The company the reports are computed for.
    #[arg(long, global = true, default_value_t = 1)]
    company: i64,

    /// First year of the reporting range.
    #[arg(long, global = true, default_value_t = 2024)]
    from_year: i32,

    /// Last year of the reporting range (defaults to `from-year`).
    #[arg(long, global = true)]
    to_year: Option<i32>,

    /// Restrict the reports to a single calendar month (1-12).
    #[arg(long, global = true)]
    month: Option<u32>,
}

impl ScopeArgs {
    fn to_scope(&self) -> anyhow::Result<Scope> {
        let to_year = self.to_year.unwrap_or(self.from_year);
        Ok(Scope::new(self.company, self.from_year, to_year, self.month)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Per-month revenue, expense, profit and margin totals.
    Summary {
        /// Show the most recent month first.
        #[arg(long)]
        latest_first: bool,
    },
    /// Months ranked by net margin, best first.
    Margins,
    /// Goal attainment per month (and per category where goals are scoped).
    Goals,
    /// Total expense per category, largest first.
    Expenses,
    /// Month-over-month direction for one metric.
    Trends {
        #[arg(long, value_enum, default_value = "revenue")]
        metric: MetricArg,
    },
    /// Top clients or suppliers by gross volume.
    Counterparties {
        #[arg(long, value_enum, default_value = "clients")]
        side: SideArg,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Revenue,
    Expense,
    Profit,
}

impl From<MetricArg> for TrendMetric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Revenue => TrendMetric::Revenue,
            MetricArg::Expense => TrendMetric::Expense,
            MetricArg::Profit => TrendMetric::Profit,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Clients,
    Suppliers,
}

impl From<SideArg> for CategoryKind {
    fn from(value: SideArg) -> Self {
        match value {
            SideArg::Clients => CategoryKind::Revenue,
            SideArg::Suppliers => CategoryKind::Expense,
        }
    }
}

/// Picks the record source: a JSON snapshot file when `--data` is given,
/// otherwise the PostgreSQL store from `DATABASE_URL`.
async fn resolve_source(cli: &Cli) -> anyhow::Result<Arc<dyn RecordSource>> {
    match &cli.data {
        Some(path) => {
            tracing::info!(path = %path.display(), "using JSON snapshot store");
            Ok(Arc::new(InMemoryStore::from_json_file(path)?))
        }
        None => {
            let pool = connect().await?;
            Ok(Arc::new(DbRepository::new(pool)))
        }
    }
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn render_summaries(rows: Vec<kpi_engine::PeriodSummary>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Period",
        "Gross Revenue",
        "Gross Expense",
        "Gross Profit",
        "Net Profit",
        "Gross Margin %",
        "Net Margin %",
        "Status",
        "Margin Band",
    ]);
    for s in rows {
        table.add_row(vec![
            s.period.to_string(),
            s.gross_revenue.to_string(),
            s.gross_expense.to_string(),
            s.gross_profit.to_string(),
            s.net_profit.to_string(),
            s.gross_margin_pct.to_string(),
            s.net_margin_pct.to_string(),
            s.status.to_string(),
            s.margin_band.to_string(),
        ]);
    }
    table
}

fn render_goals(rows: Vec<kpi_engine::GoalComparison>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Period",
        "Category",
        "Goal",
        "Realized",
        "Difference",
        "Attainment %",
        "Status",
    ]);
    for g in rows {
        let category = g
            .category_name
            .or_else(|| g.category_id.map(|id| format!("#{id}")))
            .unwrap_or_else(|| "(company-wide)".to_string());
        table.add_row(vec![
            g.period.to_string(),
            category,
            g.goal_revenue.to_string(),
            g.realized_revenue.to_string(),
            g.difference.to_string(),
            g.attainment_pct.to_string(),
            g.status.to_string(),
        ]);
    }
    table
}

fn render_expenses(rows: Vec<kpi_engine::CategoryExpense>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Total Expense", "Transactions", "Share %"]);
    for e in rows {
        let category = e
            .category_name
            .unwrap_or_else(|| format!("#{}", e.category_id));
        table.add_row(vec![
            category,
            e.total_expense.to_string(),
            e.transaction_count.to_string(),
            e.share_pct.to_string(),
        ]);
    }
    table
}

fn render_trends(rows: Vec<kpi_engine::TrendPoint>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Period", "Metric", "Value", "Prior", "Variation %", "Trend"]);
    for t in rows {
        table.add_row(vec![
            t.period.to_string(),
            t.metric.to_string(),
            t.value.to_string(),
            t.prior_value.map(|v| v.to_string()).unwrap_or_default(),
            t.variation_pct.map(|v| v.to_string()).unwrap_or_default(),
            t.label.to_string(),
        ]);
    }
    table
}

fn render_counterparties(rows: Vec<kpi_engine::CounterpartySummary>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Counterparty", "Transactions", "Total Gross", "Average Ticket"]);
    for c in rows {
        table.add_row(vec![
            c.name,
            c.transaction_count.to_string(),
            c.total_gross.to_string(),
            c.average_ticket.to_string(),
        ]);
    }
    table
}
