use std::path::PathBuf;

use clap::Parser;
use dialoguer::Input;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hagwon_timetable::{
    config::Config,
    filter, ics,
    info::{default_first_day, parse_date, Term},
    parse_schedule, parse_schedule_multiple,
    schedule::format_entries,
    source::BackendClient,
    timetable::{self, Timetable},
    ScheduleEntry,
};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// The schedule, i.e.: "월/수/금 18:00~22:00, 토 10:00~12:00"
    #[clap(value_parser)]
    schedule: Option<String>,

    /// Fetch the schedule of a class from the backend
    #[clap(short, long, value_name = "CLASS ID", conflicts_with_all = ["schedule", "academy"])]
    class: Option<String>,

    /// Fetch the schedules of every class of an academy
    #[clap(short, long, value_name = "ACADEMY ID", conflicts_with = "schedule")]
    academy: Option<String>,

    /// With --academy, use the academy's consultation hours instead of its classes
    #[clap(long, requires = "academy")]
    consultation: bool,

    /// Name shown in the timetable for a schedule given on the command line
    #[clap(short, long)]
    name: Option<String>,

    /// Print the parsed entries as JSON
    #[clap(long, conflicts_with_all = ["summary", "normalize", "export"])]
    json: bool,

    /// Print every day with the time range of the first clause
    #[clap(long, conflicts_with_all = ["normalize", "export"])]
    summary: bool,

    /// Print the schedule back with days sharing a time range grouped
    #[clap(long, conflicts_with = "export")]
    normalize: bool,

    /// Choose the classes and days to keep
    #[clap(short, long)]
    select: bool,

    /// Export to iCalendar format (.ics)
    #[clap(short, long, value_name = "FILE NAME")]
    export: Option<String>,

    /// First day of the term, i.e.: 2025-03-04
    #[clap(short, long)]
    first_day: Option<String>,

    /// Number of weeks the classes repeat, default to the configuration
    #[clap(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    weeks: Option<u32>,

    /// If the exported ICS file should not use the timezone
    #[clap(long)]
    no_tz: bool,

    /// Configuration file
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// A schedule string and the name to show it under
struct Source {
    name: Option<String>,
    schedule: Option<String>,
}

#[derive(Serialize)]
struct Parsed<'a> {
    name: Option<&'a str>,
    entries: Vec<ScheduleEntry>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hagwon_timetable={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn sources(args: &Args, config: &Config) -> Result<Vec<Source>, Box<dyn std::error::Error>> {
    if let Some(id) = &args.class {
        let client = BackendClient::new(&config.backend)?;
        info!(%id, "fetching class");
        let class = client.fetch_class(id).await?;

        return Ok(vec![Source {
            name: Some(class.name),
            schedule: class.schedule,
        }]);
    }

    if let Some(id) = &args.academy {
        let client = BackendClient::new(&config.backend)?;
        if args.consultation {
            let academy = client.fetch_academy(id).await?;
            return Ok(vec![Source {
                name: Some(format!("{} 상담", academy.name)),
                schedule: academy.schedule,
            }]);
        }

        return Ok(client
            .fetch_academy_classes(id)
            .await?
            .into_iter()
            .map(|class| Source {
                name: Some(class.name),
                schedule: class.schedule,
            })
            .collect());
    }

    let schedule = match &args.schedule {
        Some(schedule) => schedule.clone(),
        None => Input::new()
            .with_prompt("시간표 (예: 월/수/금 18:00~22:00)")
            .allow_empty(true)
            .interact_text()?,
    };

    Ok(vec![Source {
        name: args.name.clone(),
        schedule: Some(schedule),
    }])
}

/// Name prefix for textual outputs, only when there is a name
fn prefix(source: &Source) -> String {
    source
        .name
        .as_deref()
        .map(|name| format!("{name}: "))
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    init_logging(&config.logging.level);

    let sources = sources(&args, &config).await?;

    if args.json {
        let parsed: Vec<Parsed> = sources
            .iter()
            .map(|source| Parsed {
                name: source.name.as_deref(),
                entries: parse_schedule_multiple(source.schedule.as_deref()),
            })
            .collect();

        // A lone schedule from the command line is printed as a bare list
        if let [single] = &parsed[..] {
            if args.class.is_none() && args.academy.is_none() && args.name.is_none() {
                println!("{}", serde_json::to_string_pretty(&single.entries)?);
                return Ok(());
            }
        }
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    if args.summary {
        for source in &sources {
            match parse_schedule(source.schedule.as_deref()) {
                Some(summary) => println!("{}{}", prefix(source), summary.to_schedule_string()),
                None => println!("{}-", prefix(source)),
            }
        }
        return Ok(());
    }

    if args.normalize {
        for source in &sources {
            let entries = parse_schedule_multiple(source.schedule.as_deref());
            println!("{}{}", prefix(source), format_entries(&entries));
        }
        return Ok(());
    }

    let mut blocks = vec![];
    for source in &sources {
        let entries = parse_schedule_multiple(source.schedule.as_deref());
        if entries.is_empty() {
            warn!(name = ?source.name, "no usable schedule");
        }
        blocks.extend(timetable::blocks(&entries, source.name.as_deref()));
    }

    if args.select {
        blocks = filter::timetable(blocks)?;
    }

    if let Some(filename) = args.export {
        let today = chrono::Local::now().date_naive();
        let first_day = match args.first_day {
            Some(day) => parse_date(&day)?,
            None => {
                let day: String = Input::new()
                    .with_prompt("개강일")
                    .default(default_first_day(today).to_string())
                    .interact_text()?;
                parse_date(&day)?
            }
        };
        let term = Term {
            first_day,
            weeks: args.weeks.unwrap_or(config.calendar.weeks),
        };

        // Export the calendar
        let tz = (!args.no_tz).then_some(config.calendar.timezone.as_str());
        let calendar = ics::build(&blocks, &term, tz);
        let filename = ics::export(&calendar, &filename)?;

        println!("iCalendar 파일을 저장했습니다 => {filename}");
    } else {
        // Show the timetable
        let timetable = Timetable::build(blocks, config.timetable.slot_minutes);
        print!("{}", timetable::render(&timetable, config.timetable.cell_length));

        for (first, second) in timetable.conflicts() {
            println!(
                "겹치는 수업: {} / {}",
                timetable.blocks[*first].label, timetable.blocks[*second].label
            );
        }
    }

    Ok(())
}
