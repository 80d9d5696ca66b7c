use chrono::Local;
use clap::Subcommand;
use postqueue_core::{
    generate_schedule, parse_slots, Config, ScheduleRequest, ScheduleTime, SlotSpec,
};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Generate dispatch times for queued jobs
    Generate {
        /// Number of queued jobs to place
        total_jobs: usize,
        /// Daily dispatch cap (defaults from config)
        #[arg(long)]
        per_day: Option<usize>,
        /// Comma-separated slot rotation, e.g. "6,11,14:30"
        #[arg(long, value_delimiter = ',')]
        slots: Option<Vec<String>>,
        /// Extra whole days before the first dispatch day
        #[arg(long)]
        start_days: Option<u32>,
        /// Emit epoch seconds instead of calendar instants
        #[arg(long)]
        timestamps: bool,
    },
    /// Show the instant the first queued job would dispatch at
    Next {
        /// Number of queued jobs to place
        total_jobs: usize,
        /// Daily dispatch cap (defaults from config)
        #[arg(long)]
        per_day: Option<usize>,
        /// Comma-separated slot rotation, e.g. "6,11,14:30"
        #[arg(long, value_delimiter = ',')]
        slots: Option<Vec<String>>,
        /// Extra whole days before the first dispatch day
        #[arg(long)]
        start_days: Option<u32>,
    },
    /// Show the configured slot rotation in canonical form
    Slots,
}

fn build_request(
    total_jobs: usize,
    per_day: Option<usize>,
    slots: Option<Vec<String>>,
    start_days: Option<u32>,
) -> ScheduleRequest {
    let mut request = Config::load_or_default().request(total_jobs);
    if let Some(per_day) = per_day {
        request.jobs_per_day = per_day;
    }
    if let Some(slots) = slots {
        request.slots = slots.iter().map(|s| SlotSpec::from(s.as_str())).collect();
    }
    if let Some(start_days) = start_days {
        request.start_day_offset = start_days;
    }
    request
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Generate {
            total_jobs,
            per_day,
            slots,
            start_days,
            timestamps,
        } => {
            let request =
                build_request(total_jobs, per_day, slots, start_days).with_timestamps(timestamps);
            let times = generate_schedule(&request, &Local::now())?;

            let rendered: Vec<serde_json::Value> = times
                .iter()
                .map(|time| match time {
                    ScheduleTime::Instant(instant) => {
                        serde_json::Value::String(instant.to_rfc3339())
                    }
                    ScheduleTime::Timestamp(ts) => serde_json::json!(ts),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
        ScheduleAction::Next {
            total_jobs,
            per_day,
            slots,
            start_days,
        } => {
            let request = build_request(total_jobs, per_day, slots, start_days);
            match request.first_dispatch(&Local::now())? {
                Some(instant) => println!("{}", instant.to_rfc3339()),
                None => println!("no jobs queued"),
            }
        }
        ScheduleAction::Slots => {
            let config = Config::load_or_default();
            let slots = parse_slots(&config.scheduler.daily_slots)?;
            let rendered: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }
    Ok(())
}
