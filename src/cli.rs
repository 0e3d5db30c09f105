// src/cli.rs

use crate::domain::FilterCriteria;
use crate::errors::AppError;
use clap::Parser;
use dialoguer::Input;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Ranks Almaty apartment listings from krisha.kz by investment score")]
pub struct Args {
    #[arg(long, default_value = "kazakhstan")]
    pub country: String,

    #[arg(long, default_value = "almaty")]
    pub city: String,

    /// Exact room count to keep
    #[arg(long)]
    pub rooms: Option<String>,

    /// Substring the location must contain (case-insensitive)
    #[arg(long)]
    pub district: Option<String>,

    /// Maximum price; anything unparsable means no limit
    #[arg(long)]
    pub budget: Option<String>,

    /// TOML configuration file (defaults to krisha.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also dump the ranked listings as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print recent runs and exit
    #[arg(long)]
    pub history: bool,

    /// Never prompt; missing criteria mean "no filter"
    #[arg(long)]
    pub no_prompt: bool,
}

impl Args {
    /// Criteria from flags, asking interactively for any flag left out.
    pub fn criteria(&self) -> Result<FilterCriteria, AppError> {
        let ask = |given: &Option<String>, prompt: &str| -> Result<String, AppError> {
            match given {
                Some(v) => Ok(v.clone()),
                None if self.no_prompt => Ok(String::new()),
                None => prompt_text(prompt),
            }
        };

        let rooms = ask(&self.rooms, "Rooms desired")?;
        let district = ask(&self.district, "Preferred district")?;
        let budget = ask(&self.budget, "Maximum budget")?;

        Ok(FilterCriteria::from_inputs(&rooms, &district, &budget))
    }
}

fn prompt_text(prompt: &str) -> Result<String, AppError> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_criteria_without_prompting() {
        let args = Args::parse_from([
            "krisha_scraper",
            "--rooms",
            "2",
            "--district",
            "Медеуский",
            "--budget",
            "60 000 000",
            "--no-prompt",
        ]);

        let criteria = args.criteria().unwrap();
        assert_eq!(criteria.rooms, Some(2));
        assert_eq!(criteria.district.as_deref(), Some("Медеуский"));
        assert_eq!(criteria.max_price, Some(60_000_000.0));
    }

    #[test]
    fn no_prompt_leaves_missing_filters_off() {
        let args = Args::parse_from(["krisha_scraper", "--no-prompt"]);
        assert_eq!(args.criteria().unwrap(), FilterCriteria::default());
        assert_eq!(args.country, "kazakhstan");
        assert_eq!(args.city, "almaty");
    }
}
