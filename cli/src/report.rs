use tiptrack_core::{
    Direction, EnrichedShiftRecord, PeriodReport, ShiftType, SummaryStats, WeekdayBucket,
};
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify, Panel};
use tabled::settings::object::Rows;

#[derive(Tabled)]
struct ShiftRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    shift_type: String,
    #[tabled(rename = "Tip")]
    tip: String,
    #[tabled(rename = "Per hour")]
    hourly: String,
    #[tabled(rename = "Tip rate")]
    tip_rate: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct WeekdayRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Avg")]
    avg: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Shifts")]
    count: usize,
}

#[derive(Tabled)]
struct KeyValueRow {
    #[tabled(rename = "Metric")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

fn shift_type_label(shift_type: ShiftType) -> &'static str {
    match shift_type {
        ShiftType::Early => "early",
        ShiftType::Late => "late",
        ShiftType::Unspecified => "-",
    }
}

pub fn shifts_table(shifts: &[EnrichedShiftRecord]) -> String {
    let rows: Vec<ShiftRow> = shifts.iter().map(|s| {
        let id_str = s.id.to_string();
        ShiftRow {
            date: s.date.format("%Y-%m-%d").to_string(),
            day: s.weekday_label.clone(),
            id: id_str[..8].to_string(),
            shift_type: shift_type_label(s.shift_type).to_string(),
            tip: money(s.tip_amount),
            hourly: money(s.hourly_rate),
            tip_rate: s.tip_rate_percent.map(|p| format!("{:.2}%", p)).unwrap_or_else(|| "-".to_string()),
            note: s.note.clone().unwrap_or_default(),
        }
    }).collect();

    styled(Table::new(rows)).to_string()
}

pub fn weekday_table(buckets: &[WeekdayBucket]) -> String {
    let rows: Vec<WeekdayRow> = buckets.iter().map(|b| WeekdayRow {
        day: b.label.clone(),
        avg: money(b.avg),
        total: money(b.total),
        count: b.count,
    }).collect();

    styled(Table::new(rows)).to_string()
}

fn summary_rows(stats: &SummaryStats) -> Vec<KeyValueRow> {
    let row = |key: &str, value: String| KeyValueRow { key: key.to_string(), value };
    vec![
        row("Total tips", money(stats.total_tips)),
        row("Shifts", stats.total_shifts.to_string()),
        row("Avg / shift", money(stats.avg_per_shift)),
        row("Avg / hour", money(stats.avg_per_hour)),
        row("Best shift", money(stats.best_shift)),
        row("Worst shift", money(stats.worst_shift)),
        row("Total revenue", money(stats.total_revenue)),
        row(
            "Avg tip rate",
            stats.avg_tip_rate_percent.map(|p| format!("{:.2}%", p)).unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

pub fn print_report(report: &PeriodReport) {
    let title = format!("{:?} of {}", report.period, report.reference.format("%Y-%m-%d"));

    let Some(stats) = &report.summary else {
        println!("{}: no shifts in this period.", title);
        return;
    };

    let mut summary = styled(Table::new(summary_rows(stats)));
    summary
        .with(Panel::header(title))
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", summary);

    // A flat comparison is not worth a line
    if let Some(change) = report.comparison {
        match change.direction {
            Direction::Up => println!("+{:.1}% vs. previous period", change.percent_change),
            Direction::Down => println!("{:.1}% vs. previous period", change.percent_change),
            Direction::Flat => {}
        }
    }

    if let Some(types) = report.shift_types {
        if types.early.count > 0 || types.late.count > 0 {
            println!(
                "Early: {} avg over {} shifts | Late: {} avg over {} shifts",
                money(types.early.avg),
                types.early.count,
                money(types.late.avg),
                types.late.count
            );
        }
    }

    println!("{}", weekday_table(&report.weekdays));
}
