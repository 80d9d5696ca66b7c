use clap::Subcommand;
use postqueue_core::{Config, SlotSpec};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current scheduler defaults
    Show,
    /// Set the default slot rotation
    SetSlots {
        /// Comma-separated rotation, e.g. "6,11,14:30"
        #[arg(value_delimiter = ',')]
        slots: Vec<String>,
    },
    /// Set the default daily dispatch cap
    SetPerDay {
        jobs_per_day: usize,
    },
    /// Set the default start delay in whole days
    SetStartDays {
        days: u32,
    },
    /// Reset scheduler defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetSlots { slots } => {
            let specs: Vec<SlotSpec> =
                slots.iter().map(|s| SlotSpec::from(s.as_str())).collect();
            // Reject bad slots before they reach the config file.
            postqueue_core::parse_slots(&specs)?;
            let mut config = Config::load_or_default();
            config.scheduler.daily_slots = specs;
            config.save()?;
            println!("slot rotation updated");
        }
        ConfigAction::SetPerDay { jobs_per_day } => {
            let mut config = Config::load_or_default();
            config.scheduler.jobs_per_day = jobs_per_day;
            config.save()?;
            println!("jobs_per_day set to {jobs_per_day}");
        }
        ConfigAction::SetStartDays { days } => {
            let mut config = Config::load_or_default();
            config.scheduler.start_day_offset = days;
            config.save()?;
            println!("start_day_offset set to {days}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("scheduler defaults reset");
        }
    }
    Ok(())
}
