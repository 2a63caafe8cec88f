//! Partnernet CLI: command-line front end for the partner analytics dashboard
//!
//! Every command loads (or generates) a dataset, applies the filter flags and
//! prints one view of the dashboard. `shell` keeps a session open and lets
//! the filters be changed interactively.

mod output;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use output::{emit, OutputFormat};
use partnernet::analytics::{
    apply_filters, compare, leaderboards, partner_detail, rank, selectable_partners,
};
use partnernet::io::{export_dataset, export_summaries};
use partnernet::render::{format_currency, render_network, render_report};
use partnernet::{
    build_view, DashboardConfig, Dataset, FilterSet, KpiMetric, Level, Partner, PartnerId, Session,
    SortOrder, Status, ViewOptions,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "partnernet", version, about = "Partner network analytics dashboard")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "PARTNERNET_CONFIG")]
    config: Option<PathBuf>,

    /// Partner CSV to load instead of generating partners
    #[arg(long, global = true)]
    upload: Option<PathBuf>,

    /// Number of generated partners
    #[arg(long, global = true)]
    partners: Option<usize>,

    /// RNG seed for reproducible data
    #[arg(long, global = true, env = "PARTNERNET_SEED")]
    seed: Option<u64>,

    /// Partner levels to include (comma separated, default all)
    #[arg(long, global = true, value_delimiter = ',', value_parser = parse_level)]
    level: Vec<Level>,

    /// Partner statuses to include (comma separated, default all)
    #[arg(long, global = true, value_delimiter = ',', value_parser = parse_status)]
    status: Vec<Status>,

    /// Filter partners by name or id
    #[arg(long, global = true)]
    search: Option<String>,

    /// Focus the fact tables on one partner id
    #[arg(long, global = true)]
    select: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SummaryKind {
    Revenue,
    Activity,
    Social,
    Kpi,
    Level,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SeriesKind {
    Revenue,
    Activity,
    Social,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset and write the raw tables as CSV
    Generate {
        #[arg(long, default_value = "dataset")]
        out: PathBuf,
    },
    /// List the partners that pass the filters
    Partners {
        /// Only the partner selector's options (search matches names only)
        #[arg(long)]
        selectable: bool,
    },
    /// Per-partner or per-level summary tables
    Summary {
        #[arg(long, value_enum, default_value = "kpi")]
        by: SummaryKind,
    },
    /// Daily time series
    Series {
        #[arg(value_enum, default_value = "revenue")]
        kind: SeriesKind,
    },
    /// Top or bottom partners by a KPI
    Rank {
        #[arg(long, default_value = "revenue", value_parser = parse_metric)]
        metric: KpiMetric,
        #[arg(long, short)]
        k: Option<usize>,
        /// Lowest values first
        #[arg(long)]
        bottom: bool,
    },
    /// Fixed top/bottom leaderboards
    Leaderboard,
    /// Compare up to five partners across KPIs
    Compare {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Drill down into one partner
    Detail { id: u64 },
    /// Write the seven summary CSV files
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write the interactive network graph as HTML
    Graph {
        #[arg(long, default_value = "partner_network.html")]
        out: PathBuf,
    },
    /// Write the full dashboard report as HTML
    Report {
        #[arg(long, default_value = "partner_dashboard.html")]
        out: PathBuf,
    },
    /// Start an interactive shell
    Shell,
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_metric(s: &str) -> Result<KpiMetric, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_yaml_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(n) = cli.partners {
        config.generator.partner_count = n;
    }
    if cli.seed.is_some() {
        config.generator.seed = cli.seed;
    }
    Ok(config)
}

fn open_session(cli: &Cli) -> anyhow::Result<Session> {
    let config = load_config(cli)?;
    match &cli.upload {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Session::from_upload(config, file)?)
        }
        None => Ok(Session::create(config)),
    }
}

fn filters_from(cli: &Cli) -> FilterSet {
    let mut filters = FilterSet::default();
    if !cli.level.is_empty() {
        filters = filters.with_levels(cli.level.iter().copied());
    }
    if !cli.status.is_empty() {
        filters = filters.with_statuses(cli.status.iter().copied());
    }
    if let Some(q) = &cli.search {
        filters = filters.with_search(q.clone());
    }
    filters.with_selected(cli.select.map(PartnerId))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut session = open_session(&cli)?;
    let mut filters = filters_from(&cli);
    let format = cli.format;

    match cli.command {
        Commands::Shell => run_shell(&mut session, &mut filters, format)?,
        command => run_command(&session, &filters, command, format)?,
    }

    session.destroy();
    Ok(())
}

fn partner_rows(dataset: &Dataset, filters: &FilterSet, selectable: bool) -> Vec<Partner> {
    let partners = if selectable {
        selectable_partners(dataset, filters)
    } else {
        apply_filters(dataset, filters).partners
    };
    partners.into_iter().cloned().collect()
}

fn run_command(
    session: &Session,
    filters: &FilterSet,
    command: Commands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = session.config();
    let dataset = session.dataset();
    let options = ViewOptions::from_config(config);

    match command {
        Commands::Generate { out } => {
            let written = export_dataset(&out, dataset)?;
            let stats = dataset.stats();
            println!(
                "Generated {} partners, {} sales, {} activities, {} social records",
                stats.partners, stats.sales, stats.activity, stats.social
            );
            for path in written {
                println!("  {}", path.display());
            }
        }
        Commands::Partners { selectable } => emit(&partner_rows(dataset, filters, selectable), format)?,
        Commands::Summary { by } => {
            let view = build_view(dataset, filters, &options);
            match by {
                SummaryKind::Revenue => emit(&view.summaries.revenue, format)?,
                SummaryKind::Activity => emit(&view.summaries.activity, format)?,
                SummaryKind::Social => emit(&view.summaries.social, format)?,
                SummaryKind::Kpi => emit(&view.summaries.kpi, format)?,
                SummaryKind::Level => {
                    let rows = view.level_summary.ready().cloned().unwrap_or_default();
                    emit(&rows, format)?
                }
            }
        }
        Commands::Series { kind } => {
            let view = build_view(dataset, filters, &options);
            match kind {
                SeriesKind::Revenue => emit(&view.time_series.revenue, format)?,
                SeriesKind::Activity => emit(&view.time_series.activity, format)?,
                SeriesKind::Social => emit(&view.time_series.social, format)?,
            }
        }
        Commands::Rank { metric, k, bottom } => {
            let view = build_view(dataset, filters, &options);
            let order = if bottom { SortOrder::Ascending } else { SortOrder::Descending };
            let rows = rank(&view.summaries.kpi, metric, order, k.unwrap_or(options.ranking_k));
            emit(&rows, format)?;
        }
        Commands::Leaderboard => {
            let view = build_view(dataset, filters, &options);
            let boards = leaderboards(&view.summaries.kpi, options.leaderboard_k);
            for (title, rows) in [
                ("Top revenue", &boards.top_revenue),
                ("Bottom revenue", &boards.bottom_revenue),
                ("Most active", &boards.top_activity),
                ("Least active", &boards.bottom_activity),
                ("Top advocacy", &boards.top_advocacy),
                ("Most posts", &boards.top_engagement),
                ("Best sentiment", &boards.top_sentiment),
            ] {
                println!("{}", title);
                emit(rows, format)?;
            }
        }
        Commands::Compare { ids } => {
            let view = build_view(dataset, filters, &options);
            let ids: Vec<PartnerId> = ids.into_iter().map(PartnerId).collect();
            let profiles = compare(&view.summaries.kpi, &ids, options.max_compare)?;
            emit(&profiles, format)?;
        }
        Commands::Detail { id } => print_detail(session, PartnerId(id), format)?,
        Commands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| config.export.directory.clone());
            let view = build_view(dataset, filters, &options);
            for path in export_summaries(&dir, &view.summaries, &view.time_series)? {
                println!("{}", path.display());
            }
        }
        Commands::Graph { out } => {
            let view = build_view(dataset, filters, &options);
            let Some(graph) = view.network.ready() else {
                bail!("no partners match the current filters");
            };
            write_html(&out, &render_network(graph, &config.graph)?)?;
        }
        Commands::Report { out } => {
            let view = build_view(dataset, filters, &options);
            write_html(&out, &render_report(&view)?)?;
        }
        Commands::Shell => bail!("shell cannot be nested"),
    }
    Ok(())
}

fn write_html(path: &Path, html: &str) -> anyhow::Result<()> {
    fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} bytes to {}", html.len(), path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_detail(session: &Session, id: PartnerId, format: OutputFormat) -> anyhow::Result<()> {
    let detail = partner_detail(session.dataset(), id)?;
    let p = &detail.partner;
    println!("{} (#{})", p.name, p.partner_id);
    println!("  Level:     {}", p.level);
    println!("  Status:    {}", p.status);
    println!("  Joined:    {}", p.join_date);
    println!("  Revenue:   {}", format_currency(p.total_revenue));
    println!("  Advocacy:  {}/100", p.advocacy_score);
    println!("  Sentiment: {:.2}", p.sentiment);
    match &detail.parent {
        Some(parent) => println!("  Parent:    {} (#{})", parent.name, parent.partner_id),
        None => println!("  Parent:    -"),
    }
    println!("  Children:  {}", detail.children.len());
    println!("  Depth:     {}", detail.depth);
    println!("  Downline:  {}", detail.downline);
    println!();
    println!("Direct reports");
    emit(&detail.children, format)?;
    println!("Revenue by date");
    emit(&detail.revenue_by_date, format)?;
    println!("Activity by date");
    emit(&detail.activity_timeline, format)?;
    println!("Activity breakdown");
    for c in &detail.activity_breakdown {
        println!("  {:<10} {}", c.activity_type.to_string(), c.count);
    }
    Ok(())
}

fn print_filters(filters: &FilterSet) {
    let levels: Vec<String> = filters.levels.iter().map(|l| l.to_string()).collect();
    let statuses: Vec<String> = filters.statuses.iter().map(|s| s.to_string()).collect();
    println!("Levels:   {}", levels.join(", "));
    println!("Statuses: {}", statuses.join(", "));
    println!("Search:   {}", filters.search.as_deref().unwrap_or("-"));
    println!(
        "Selected: {}",
        filters.selected.map_or_else(|| "-".to_string(), |id| id.to_string())
    );
}

fn parse_list<T: std::str::FromStr>(arg: &str) -> anyhow::Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(|e| anyhow::anyhow!("{}", e)))
        .collect()
}

fn shell_command(
    session: &mut Session,
    filters: &mut FilterSet,
    format: OutputFormat,
    line: &str,
) -> anyhow::Result<()> {
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };
    let options = ViewOptions::from_config(session.config());

    match cmd {
        ":filters" => print_filters(filters),
        ":level" => {
            *filters = filters.clone().with_levels(if arg.is_empty() {
                Level::ALL.to_vec()
            } else {
                parse_list::<Level>(arg)?
            })
        }
        ":status" => {
            *filters = filters.clone().with_statuses(if arg.is_empty() {
                Status::ALL.to_vec()
            } else {
                parse_list::<Status>(arg)?
            })
        }
        ":search" => *filters = filters.clone().with_search(arg),
        ":select" => {
            let selected = match arg {
                "" | "none" => None,
                key => match key.parse::<u64>() {
                    Ok(id) => Some(PartnerId(id)),
                    Err(_) => match session.dataset().partner_by_name(key) {
                        Some(p) => Some(p.partner_id),
                        None => bail!("no partner named '{}'", key),
                    },
                },
            };
            *filters = filters.clone().with_selected(selected);
        }
        ":partners" => run_command(session, filters, Commands::Partners { selectable: false }, format)?,
        ":summary" => {
            let by = match arg {
                "" | "kpi" => SummaryKind::Kpi,
                "revenue" => SummaryKind::Revenue,
                "activity" => SummaryKind::Activity,
                "social" => SummaryKind::Social,
                "level" => SummaryKind::Level,
                other => bail!("unknown summary '{}'", other),
            };
            run_command(session, filters, Commands::Summary { by }, format)?
        }
        ":rank" => {
            let mut parts = arg.split_whitespace();
            let metric = parts.next().map_or(Ok(KpiMetric::Revenue), str::parse)?;
            let k = parts.next().map(str::parse).transpose().context("k must be a number")?;
            run_command(session, filters, Commands::Rank { metric, k, bottom: false }, format)?
        }
        ":bottom" => {
            let metric = if arg.is_empty() { KpiMetric::Revenue } else { arg.parse()? };
            run_command(session, filters, Commands::Rank { metric, k: None, bottom: true }, format)?
        }
        ":leaderboard" => run_command(session, filters, Commands::Leaderboard, format)?,
        ":compare" => {
            let ids = parse_list::<u64>(arg)?;
            run_command(session, filters, Commands::Compare { ids }, format)?
        }
        ":detail" => {
            let id = match (arg, filters.selected) {
                ("", Some(id)) => id,
                ("", None) => bail!("no partner selected; use :detail <id> or :select <id>"),
                (id, _) => PartnerId(id.parse().context("partner id must be a number")?),
            };
            print_detail(session, id, format)?
        }
        ":regenerate" => {
            session.regenerate();
            *filters = FilterSet::default();
            println!("Generated {} partners", session.dataset().partners.len());
        }
        ":upload" => {
            if arg.is_empty() {
                bail!("usage: :upload <file.csv>");
            }
            let file = File::open(arg).with_context(|| format!("opening {}", arg))?;
            session.load_partners(file)?;
            *filters = FilterSet::default();
            println!("Loaded {} partners", session.dataset().partners.len());
        }
        ":export" => {
            let dir = (!arg.is_empty()).then(|| PathBuf::from(arg));
            run_command(session, filters, Commands::Export { dir }, format)?
        }
        ":graph" => {
            let out = PathBuf::from(if arg.is_empty() { "partner_network.html" } else { arg });
            run_command(session, filters, Commands::Graph { out }, format)?
        }
        ":report" => {
            let out = PathBuf::from(if arg.is_empty() { "partner_dashboard.html" } else { arg });
            run_command(session, filters, Commands::Report { out }, format)?
        }
        ":stats" => {
            let view = build_view(session.dataset(), filters, &options);
            match view.headline.ready() {
                Some(h) => {
                    println!("Partners:   {}", view.partner_count);
                    println!("Revenue:    {}", format_currency(h.total_revenue));
                    println!("Activities: {}", h.total_activities);
                    println!("Posts:      {}", h.total_posts);
                    println!("Shares:     {}", h.total_shares);
                }
                None => println!("(no data)"),
            }
        }
        other => bail!("unknown command '{}', try :help", other),
    }
    Ok(())
}

fn run_shell(session: &mut Session, filters: &mut FilterSet, format: OutputFormat) -> anyhow::Result<()> {
    println!("Partnernet Interactive Shell");
    println!("Type :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("partnernet> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :filters              Show the active filters");
                println!("  :level [a,b]          Restrict levels (no argument resets)");
                println!("  :status [a,b]         Restrict statuses (no argument resets)");
                println!("  :search [text]        Filter by name or id (no argument clears)");
                println!("  :select <id|name>     Focus on one partner (none clears)");
                println!("  :partners             List matching partners");
                println!("  :stats                Headline totals");
                println!("  :summary [kind]       kpi, revenue, activity, social or level");
                println!("  :rank [metric] [k]    Top partners by a KPI");
                println!("  :bottom [metric]      Bottom partners by a KPI");
                println!("  :leaderboard          Top and bottom performers");
                println!("  :compare <id,id,..>   Compare up to five partners");
                println!("  :detail [id]          Partner drill-down");
                println!("  :regenerate           Generate a new dataset");
                println!("  :upload <file>        Load a partner CSV");
                println!("  :export [dir]         Write summary CSV files");
                println!("  :graph [file]         Write the network graph");
                println!("  :report [file]        Write the dashboard report");
                println!("  :quit                 Exit shell");
            }
            command => {
                if let Err(e) = shell_command(session, filters, format, command) {
                    eprintln!("Error: {:#}", e);
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}
