//! `civicmap` command-line front end
//!
//! Drives a [`Session`] without a browser: lists and inspects reports, replays
//! a scripted demo, and runs the randomized simulator.

use anyhow::{bail, Context, Result};
use civic_model::{Category, Location, ReportId};
use civic_session::{ClientConfig, Intent, Outcome, Session, SimulatorConfig};
use civic_view::{CategoryFilter, DetailView, ReportSummary};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("civicmap")
        .version(civic_session::VERSION)
        .about("In-memory civic issue reporting client")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Client configuration file (TOML)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Log filter when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("list")
                .about("List reports passing a category filter")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("all")
                        .help("\"all\" or a category tag such as \"noise\""),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one report with its comments")
                .arg(Arg::new("id").required(true).help("Report id"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(Command::new("demo").about("Replay a scripted session"))
        .subcommand(
            Command::new("simulate")
                .about("Run the randomized session simulator")
                .arg(
                    Arg::new("intents")
                        .long("intents")
                        .default_value("1000")
                        .value_parser(value_parser!(u64))
                        .help("Number of intents to dispatch"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("stop-on-violation")
                        .long("stop-on-violation")
                        .action(ArgAction::SetTrue)
                        .help("Stop simulation on first violation"),
                ),
        )
}

fn init_tracing(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

fn load_config(matches: &ArgMatches) -> Result<ClientConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ClientConfig::default()),
    }
}

fn print_summaries(reports: &[ReportSummary]) {
    for report in reports {
        println!(
            "{:<38} {:<16} {:<10} {:>4} {:>3}  {}",
            report.id.as_str(),
            report.category.label(),
            report.status.as_str(),
            report.supports,
            report.comment_count,
            report.title
        );
    }
}

fn print_detail(detail: &DetailView) {
    let report = &detail.report;
    println!("{} [{}]", report.title, detail.category_label);
    println!("  id:       {}", report.id);
    println!("  status:   {}", report.status);
    println!("  location: {:.4}, {:.4}", report.location.lat, report.location.lng);
    println!("  by:       {} on {}", report.user_name, report.created_at.format("%Y-%m-%d"));
    if let Some(description) = &report.description {
        println!("  {description}");
    }
    println!(
        "  supports: {}{}",
        detail.supports,
        if detail.user_support { " (you support this)" } else { "" }
    );
    println!();
    println!("{}", detail.comments_heading());
    for comment in &detail.comments {
        println!("  {}: {}", comment.user_name, comment.content);
    }
}

fn list(session: &mut Session, args: &ArgMatches) -> Result<()> {
    let category = args
        .get_one::<String>("category")
        .map(String::as_str)
        .unwrap_or("all");
    let filter: CategoryFilter = category.parse()?;
    session.dispatch(Intent::SetCategory(filter))?;

    let mobile = session.config().mobile;
    let frame = session.render(mobile);
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&frame.sidebar.reports)?);
    } else {
        print_summaries(&frame.sidebar.reports);
    }
    Ok(())
}

fn show(session: &mut Session, args: &ArgMatches) -> Result<()> {
    let Some(id) = args.get_one::<String>("id") else {
        bail!("missing report id");
    };
    let id = ReportId::from(id.as_str());
    let mobile = session.config().mobile;
    session.dispatch(Intent::SelectReport {
        id: id.clone(),
        is_mobile: mobile,
    })?;

    let frame = session.render(mobile);
    let Some(detail) = frame.detail else {
        bail!("no report with id '{id}'");
    };
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail);
    }
    Ok(())
}

fn demo(session: &mut Session) -> Result<()> {
    let mobile = session.config().mobile;
    let center = session.initial_center(Err(civic_view::GeolocationError::Unsupported));
    println!("Map centred at {:.4}, {:.4}", center.lat, center.lng);
    println!("Reports on the map: {}", session.render(mobile).markers.len());
    println!();

    session.dispatch(Intent::MapClicked(Location::new(52.5163, 13.3777)))?;
    let draft = session
        .draft()
        .with_title("Pothole on Unter den Linden")
        .with_description("Deep pothole in the right lane")
        .with_category(Category::Traffic);
    let Outcome::Created(report) = session.dispatch(Intent::SubmitDraft(draft))? else {
        bail!("draft was not accepted");
    };
    println!("Created report {}", report.id);

    session.dispatch(Intent::ToggleSupport(report.id.clone()))?;
    session.dispatch(Intent::AddComment {
        id: report.id.clone(),
        content: "Reported to the district office as well.".to_string(),
    })?;
    session.dispatch(Intent::SelectReport {
        id: report.id.clone(),
        is_mobile: mobile,
    })?;

    let frame = session.render(mobile);
    println!("Reports on the map: {}", frame.markers.len());
    println!("My reports: {}", frame.sidebar.my_reports.len());
    println!();
    if let Some(detail) = &frame.detail {
        print_detail(detail);
    }
    Ok(())
}

fn simulate(config: ClientConfig, args: &ArgMatches) -> Result<()> {
    let intents = args.get_one::<u64>("intents").copied().unwrap_or(1000);
    let seed = args.get_one::<u64>("seed").copied().unwrap_or(42);
    let stop_on_violation = args.get_flag("stop-on-violation");

    println!("Running civicmap simulator...");
    println!("Intents: {intents}");
    println!("Seed: {seed}");
    println!();

    let report = civic_session::run_simulator(SimulatorConfig {
        seed,
        intents,
        stop_on_first_violation: stop_on_violation,
        client: config,
    });
    println!("{}", report.generate_text());

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    init_tracing(level, matches.get_flag("log-json"))?;

    let config = load_config(&matches)?;
    tracing::debug!(seed = ?config.seed, user = %config.session_user.id, "config ready");

    match matches.subcommand() {
        Some(("list", args)) => list(&mut Session::new(config), args),
        Some(("show", args)) => show(&mut Session::new(config), args),
        Some(("demo", _)) => demo(&mut Session::new(config)),
        Some(("simulate", args)) => simulate(config, args),
        _ => Ok(()),
    }
}
