mod report;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use tiptrack_core::{
    config::data_dir, enrich_with_config, parse_reference_date, query_shifts, recent_shifts,
    FileShiftRepository, Locale, Period, PeriodReportUseCase, ShiftQuery, ShiftRecord,
    ShiftRepository, ShiftType, SortKey, StatsConfig,
};

#[derive(Parser)]
#[command(name = "tiptrack")]
#[command(about = "Track tips per shift and see where they come from", long_about = None)]
struct Cli {
    /// Directory holding shifts.json and config.json (default: ~/.tiptrack)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Weekday label language (en, de); overrides config.json
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record a shift (usage: add 42.50 --date yesterday --type late --revenue 610)
    Add {
        /// Tip amount collected
        tip: f64,
        /// Shift date: today, yesterday, YYYY-MM-DD, -3d, -1w
        #[arg(long, default_value = "today", allow_hyphen_values = true)]
        date: String,
        /// early or late
        #[arg(long = "type")]
        shift_type: Option<String>,
        /// Staff sharing the tips, may be fractional
        #[arg(long)]
        staff: Option<f64>,
        /// Total sales for the shift
        #[arg(long)]
        revenue: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Change fields of a recorded shift (id or its first characters)
    Edit {
        id: String,
        #[arg(long)]
        tip: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
        #[arg(long = "type")]
        shift_type: Option<String>,
        #[arg(long)]
        staff: Option<f64>,
        #[arg(long)]
        revenue: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove a shift (id or its first characters)
    Delete {
        id: String,
    },
    /// List shifts in a period
    List {
        #[arg(long, value_enum, default_value = "all")]
        period: PeriodArg,
        #[arg(long, default_value = "today", allow_hyphen_values = true)]
        date: String,
        /// Only early or late shifts
        #[arg(long = "type")]
        shift_type: Option<String>,
        /// Matches note, date (YYYY-MM-DD or DD.MM.YYYY) and weekday
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,
    },
    /// Average and total tips per weekday
    Weekdays {
        #[arg(long, value_enum, default_value = "all")]
        period: PeriodArg,
        #[arg(long, default_value = "today", allow_hyphen_values = true)]
        date: String,
    },
    /// Summary, comparison with the previous period and weekday breakdown
    Stats {
        #[arg(long, value_enum, default_value = "month")]
        period: PeriodArg,
        /// Any day inside the period
        #[arg(long, default_value = "today", allow_hyphen_values = true)]
        date: String,
    },
    /// Most recent shifts, newest first
    Recent {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PeriodArg {
    Week,
    Month,
    All,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::All => Period::All,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortArg {
    Date,
    Tip,
    Hourly,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Tip => SortKey::Tip,
            SortArg::Hourly => SortKey::HourlyRate,
        }
    }
}

fn parse_shift_type(type_str: &str) -> Result<ShiftType> {
    match type_str.to_lowercase().as_str() {
        "e" | "early" | "f" | "frueh" => Ok(ShiftType::Early),
        "l" | "late" | "s" | "spaet" => Ok(ShiftType::Late),
        _ => Err(anyhow!("Unknown shift type: '{}' (use early or late)", type_str)),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let dir = data_dir(cli.data_dir)?;
    let mut config = StatsConfig::load(&dir)?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    let repo = FileShiftRepository::new(&dir)?;
    log::debug!("using shifts at {}", repo.path().display());
    let usecase = PeriodReportUseCase::new(&repo, config);
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Add { tip, date, shift_type, staff, revenue, note }) => {
            let date = parse_reference_date(&date, today)?;

            let mut shift = ShiftRecord::new(date, tip);
            if let Some(t) = shift_type {
                shift.shift_type = parse_shift_type(&t)?;
            }
            shift.staff_count = staff;
            shift.revenue = revenue;
            shift.note = note;

            // Reject what statistics would reject later
            enrich_with_config(&shift, &config)?;

            let created = repo.create(shift)?;
            println!("Shift added: {:.2} on {} (ID: {})", tip, date, created.id);
        },
        Some(Commands::Edit { id, tip, date, shift_type, staff, revenue, note }) => {
            let mut shift = repo.find_by_prefix(&id)?;
            if let Some(tip) = tip {
                shift.tip_amount = Some(tip);
            }
            if let Some(d) = date {
                shift.date = Some(parse_reference_date(&d, today)?);
            }
            if let Some(t) = shift_type {
                shift.shift_type = parse_shift_type(&t)?;
            }
            if staff.is_some() {
                shift.staff_count = staff;
            }
            if revenue.is_some() {
                shift.revenue = revenue;
            }
            if note.is_some() {
                shift.note = note;
            }

            enrich_with_config(&shift, &config)?;
            repo.update(&shift)?;
            println!("Shift updated: {}", shift.id);
        },
        Some(Commands::Delete { id }) => {
            let shift = repo.find_by_prefix(&id)?;
            repo.delete(&shift.id)?;
            println!("Shift deleted: {}", shift.id);
        },
        Some(Commands::List { period, date, shift_type, search, sort }) => {
            let reference = parse_reference_date(&date, today)?;
            let report = usecase.report(period.into(), reference)?;
            let query = ShiftQuery {
                shift_type: shift_type.as_deref().map(parse_shift_type).transpose()?,
                search,
                sort: sort.into(),
            };
            let shifts = query_shifts(&report.shifts, &query);
            if shifts.is_empty() {
                println!("No shifts found.");
            } else {
                println!("{}", report::shifts_table(&shifts));
            }
        },
        Some(Commands::Weekdays { period, date }) => {
            let reference = parse_reference_date(&date, today)?;
            let report = usecase.report(period.into(), reference)?;
            println!("{}", report::weekday_table(&report.weekdays));
        },
        Some(Commands::Stats { period, date }) => {
            let reference = parse_reference_date(&date, today)?;
            let report = usecase.report(period.into(), reference)?;
            report::print_report(&report);
        },
        Some(Commands::Recent { limit }) => {
            let shifts = usecase.load_shifts()?;
            let recent = recent_shifts(&shifts, limit);
            if recent.is_empty() {
                println!("No shifts recorded yet.");
            } else {
                println!("{}", report::shifts_table(&recent));
            }
        },
        None => {
            // Dashboard: this month at a glance
            let report = usecase.report(Period::Month, today)?;
            report::print_report(&report);
        }
    }
    Ok(())
}
