use crate::{
    planning::{countdown, summarize, Clock, FixedClock, PackingList, SystemClock, TripPhase},
    AllocationResult, AppConfig, Budget, BudgetEngine, CategoryDistribution, FunctionFactory,
    Priority, Traveler, TripRequest,
};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fmt::Write as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the kinu tool
pub async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config);

    let matches = build_command().get_matches();
    let outcome = match matches.subcommand() {
        Some(("allocate", sub)) => allocate(sub, &config),
        Some(("countdown", sub)) => show_countdown(sub),
        Some(("packing", sub)) => packing(sub, &config),
        Some(("tools", _)) => {
            list_tools(&config);
            Ok(())
        }
        Some(("call", sub)) => call_tool(sub, &config).await,
        _ => Err(anyhow!("no subcommand given; see `kinu --help`")),
    };

    if let Err(e) = &outcome {
        error!("kinu failed: {:#}", e);
    }
    outcome
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Argument definitions for the `kinu` binary
pub fn build_command() -> Command {
    Command::new("kinu")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trip budget, countdown and packing calculator for KINU Travel")
        .subcommand_required(true)
        .subcommand(
            Command::new("allocate")
                .about("Estimate trip costs and check them against a budget")
                .arg(
                    Arg::new("destination")
                        .short('d')
                        .long("destination")
                        .value_name("PLACE")
                        .help("Destination city (unknown cities use default rates)")
                        .required(true),
                )
                .arg(date_arg("depart", "First day of the trip (YYYY-MM-DD)"))
                .arg(date_arg("return", "Last day of the trip (YYYY-MM-DD)"))
                .arg(
                    Arg::new("adults")
                        .short('a')
                        .long("adults")
                        .value_name("COUNT")
                        .value_parser(value_parser!(u32))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("child")
                        .long("child")
                        .value_name("AGE")
                        .help("Age of a child traveler (repeat for each child)")
                        .value_parser(value_parser!(u8))
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("child-unknown-age")
                        .long("child-unknown-age")
                        .value_name("COUNT")
                        .help("Children whose age is not known (billed as paying flyers)")
                        .value_parser(value_parser!(u32))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("AMOUNT")
                        .value_parser(value_parser!(f64))
                        .required(true),
                )
                .arg(
                    Arg::new("currency")
                        .short('c')
                        .long("currency")
                        .value_name("CODE")
                        .help("Currency code (or set KINU_DEFAULT_CURRENCY)"),
                )
                .arg(
                    Arg::new("priority")
                        .short('p')
                        .long("priority")
                        .value_name("CATEGORY")
                        .help("flight, accommodation or experiences")
                        .required(true),
                )
                .arg(
                    Arg::new("distribution")
                        .long("distribution")
                        .value_name("F,A,E")
                        .help("Preferred split in percent, e.g. 40,40,20"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the result as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("countdown")
                .about("Days until departure and the current trip phase")
                .arg(date_arg("depart", "First day of the trip (YYYY-MM-DD)"))
                .arg(date_arg("return", "Last day of the trip (YYYY-MM-DD)"))
                .arg(
                    Arg::new("today")
                        .long("today")
                        .value_name("DATE")
                        .help("Count from this date instead of the local date"),
                ),
        )
        .subcommand(
            Command::new("packing")
                .about("Total a packing list against a luggage allowance")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("PATH")
                        .help("JSON packing list")
                        .required(true),
                )
                .arg(
                    Arg::new("allowance")
                        .long("allowance")
                        .value_name("GRAMS")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(Command::new("tools").about("List the available tools"))
        .subcommand(
            Command::new("call")
                .about("Invoke a tool with JSON parameters")
                .arg(Arg::new("tool").required(true).index(1))
                .arg(
                    Arg::new("params")
                        .help("JSON object with the tool parameters")
                        .required(true)
                        .index(2),
                ),
        )
}

fn date_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("DATE")
        .help(help)
        .required(true)
}

fn parse_date(matches: &ArgMatches, id: &str) -> Result<NaiveDate> {
    let raw = matches
        .get_one::<String>(id)
        .ok_or_else(|| anyhow!("--{} is required", id))?;
    raw.parse::<NaiveDate>()
        .with_context(|| format!("--{} expects YYYY-MM-DD, got `{}`", id, raw))
}

fn parse_distribution(raw: &str) -> Result<CategoryDistribution> {
    let shares = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("--distribution expects three percentages, got `{}`", raw))?;

    match shares.as_slice() {
        [flight, accommodation, experiences] => Ok(CategoryDistribution::new(
            *flight,
            *accommodation,
            *experiences,
        )),
        _ => Err(anyhow!(
            "--distribution expects three percentages, got {}",
            shares.len()
        )),
    }
}

/// Build a trip request from `allocate` arguments
pub fn request_from_matches(matches: &ArgMatches, config: &AppConfig) -> Result<TripRequest> {
    let destination = matches
        .get_one::<String>("destination")
        .ok_or_else(|| anyhow!("--destination is required"))?;
    let priority: Priority = matches
        .get_one::<String>("priority")
        .ok_or_else(|| anyhow!("--priority is required"))?
        .parse()?;
    let total = *matches
        .get_one::<f64>("budget")
        .ok_or_else(|| anyhow!("--budget is required"))?;
    let currency = matches
        .get_one::<String>("currency")
        .cloned()
        .unwrap_or_else(|| config.default_currency.clone());

    let adults = matches.get_one::<u32>("adults").copied().unwrap_or(1);
    let unknown_age = matches
        .get_one::<u32>("child-unknown-age")
        .copied()
        .unwrap_or(0);

    let mut travelers: Vec<Traveler> = (0..adults).map(|_| Traveler::adult()).collect();
    if let Some(ages) = matches.get_many::<u8>("child") {
        travelers.extend(ages.map(|age| Traveler::child(*age)));
    }
    travelers.extend((0..unknown_age).map(|_| Traveler::child_of_unknown_age()));

    let mut request = TripRequest::new(
        destination.as_str(),
        parse_date(matches, "depart")?,
        parse_date(matches, "return")?,
        Budget::new(total, currency),
        priority,
    )
    .with_travelers(travelers);

    if let Some(raw) = matches.get_one::<String>("distribution") {
        request = request.with_distribution(parse_distribution(raw)?);
    }
    Ok(request)
}

fn allocate(matches: &ArgMatches, config: &AppConfig) -> Result<()> {
    let request = request_from_matches(matches, config)?;
    info!(destination = %request.destination, priority = %request.priority, "allocating budget");
    let result = BudgetEngine::new().allocate(&request)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_allocation(&request, &result));
    }
    Ok(())
}

/// Plain-text report for an allocation
pub fn render_allocation(request: &TripRequest, result: &AllocationResult) -> String {
    let mut out = String::new();
    let currency = &result.currency;

    let _ = writeln!(
        out,
        "Trip to {}: {} days / {} nights, {} travelers ({} paying flyers)",
        request.destination,
        result.trip.days,
        result.trip.nights,
        result.travelers.total_travelers,
        result.travelers.paying_flyers
    );

    let rows = [
        ("Flight", &result.breakdown.flight),
        ("Accommodation", &result.breakdown.accommodation),
        ("Experiences", &result.breakdown.experiences),
        ("Buffer", &result.breakdown.buffer),
    ];
    for (label, estimate) in rows {
        let _ = write!(
            out,
            "  {:<14}{:>10} {} {:>4}%",
            label, estimate.amount, currency, estimate.percent
        );
        if let Some(target) = estimate.target {
            let _ = write!(out, "  (target {} {})", target, currency);
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Allocated {} {} of {} {} ({:.0}% used)",
        result.allocated_budget,
        currency,
        request.budget.total,
        currency,
        result.usage_percent * 100.0
    );
    let _ = writeln!(
        out,
        "Trust zone {:.0} to {:.0} {}: {}",
        result.trust_zone.lower, result.trust_zone.upper, currency, result.status
    );

    if let Some(insight) = &result.insight {
        let _ = writeln!(out, "{}: {}", insight.title, insight.message);
        let _ = writeln!(out, "  {}", insight.suggestion);
    }
    out
}

fn show_countdown(matches: &ArgMatches) -> Result<()> {
    let departure = parse_date(matches, "depart")?;
    let return_date = parse_date(matches, "return")?;

    let clock: Box<dyn Clock> = match matches.get_one::<String>("today") {
        Some(_) => Box::new(FixedClock(parse_date(matches, "today")?)),
        None => Box::new(SystemClock),
    };

    let result = countdown(departure, return_date, clock.as_ref())?;
    let line = match result.phase {
        TripPhase::Upcoming | TripPhase::Imminent => {
            format!("{} days until departure", result.days_until)
        }
        TripPhase::DepartureDay => "Departure is today".to_string(),
        TripPhase::InProgress => format!("Day {} of the trip", result.trip_day.unwrap_or(1)),
        TripPhase::Completed => "Trip completed".to_string(),
    };
    println!("{}", line);
    Ok(())
}

fn packing(matches: &ArgMatches, config: &AppConfig) -> Result<()> {
    let path = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("--file is required"))?;
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;

    let raw: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path))?;

    let mut list: PackingList = crate::Validator::SerdeFirst.validate(raw)?;
    if let Some(allowance) = matches.get_one::<u64>("allowance") {
        list.allowance_grams = Some(*allowance);
    }
    let summary = summarize(&list, config.luggage_allowance_grams)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn list_tools(config: &AppConfig) {
    for definition in FunctionFactory::from_config(config).tool_definitions() {
        println!(
            "{:<20} {}",
            definition["function"]["name"].as_str().unwrap_or_default(),
            definition["function"]["description"]
                .as_str()
                .unwrap_or_default()
        );
    }
}

async fn call_tool(matches: &ArgMatches, config: &AppConfig) -> Result<()> {
    let name = matches
        .get_one::<String>("tool")
        .ok_or_else(|| anyhow!("tool name is required"))?;
    let raw = matches
        .get_one::<String>("params")
        .ok_or_else(|| anyhow!("tool parameters are required"))?;
    let params: serde_json::Value =
        serde_json::from_str(raw).context("tool parameters must be a JSON object")?;

    info!(tool = %name, "calling tool");
    let output = FunctionFactory::from_config(config).execute_to_payload(name, params).await;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if output.get("error").is_some() {
        return Err(anyhow!("tool `{}` failed", name));
    }
    Ok(())
}
