//! Command-line front-end: run the server or spin the wheel in a terminal.

use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

use crate::config::Settings;
use crate::core::catalog::DIET_TAGS;
use crate::core::{Catalog, Picker, RandomSource, SelectionSession, SpinError};
use crate::models::{Coordinates, FilterCriteria, PriceTier, SpinRequest};
use crate::services::{FileStore, StoreError};

/// Errors surfaced by terminal commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Spin error: {0}")]
    Spin(#[from] SpinError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "nomnom-wheel", version, about = "Spin-the-wheel restaurant picker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the wheel page and the restaurant API (default)
    Serve,
    /// Spin the wheel in the terminal
    Spin(SpinArgs),
    /// Show favorites and recent picks
    Lists(ProfileArgs),
    /// Remove a favorite by id
    Unfavorite {
        id: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Directory holding this profile's favorites and history
    #[arg(long, env = "NOMNOM_PROFILE")]
    pub profile: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SpinArgs {
    #[arg(long)]
    pub cuisine: Option<String>,
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(DIET_TAGS))]
    pub diet: Option<String>,
    /// One of $, $$, $$$, $$$$
    #[arg(long)]
    pub price: Option<PriceTier>,
    /// Maximum distance in km; needs --lat and --lng to apply
    #[arg(long)]
    pub radius: Option<f64>,
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Consecutive spins in one session
    #[arg(long, default_value_t = 1)]
    pub count: u8,
    /// Save the last pick to favorites
    #[arg(long)]
    pub save: bool,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

impl SpinArgs {
    pub fn to_request(&self) -> SpinRequest {
        SpinRequest {
            criteria: FilterCriteria {
                cuisine: self.cuisine.clone(),
                diet: self.diet.clone(),
                price: self.price,
                radius_km: self.radius,
            },
            origin: self.lat.zip(self.lng).map(|(lat, lng)| Coordinates::new(lat, lng)),
            count: self.count,
            save: self.save,
        }
    }
}

fn open_session(
    settings: &Settings,
    profile: &ProfileArgs,
) -> Result<SelectionSession<FileStore>, CliError> {
    let dir = profile
        .profile
        .clone()
        .unwrap_or_else(|| settings.storage.data_dir.clone());
    let store = FileStore::open(dir)?;
    tracing::debug!("Profile data in {}", store.dir().display());
    let picker = Picker::new(Catalog::seeded(), settings.wheel.tuning());
    Ok(SelectionSession::new(picker, store, settings.wheel.limits()))
}

/// Run `count` spins and print each pick
pub fn run_spin<W: Write, R: RandomSource + ?Sized>(
    args: &SpinArgs,
    settings: &Settings,
    rng: &mut R,
    out: &mut W,
) -> Result<(), CliError> {
    let request = args.to_request();
    request.validate()?;

    let mut session = open_session(settings, &args.profile)?;
    if let Some(origin) = request.origin {
        session.set_location(origin);
    }

    for round in 1..=request.count {
        let Some(pick) = session.spin(&request.criteria, rng)? else {
            writeln!(out, "Nothing to spin")?;
            return Ok(());
        };
        let r = &pick.chosen.restaurant;
        writeln!(
            out,
            "#{} {} [{}] {} · {} · ★ {:.1} · {}",
            round,
            r.name,
            r.id,
            r.cuisine,
            r.price,
            r.rating,
            pick.chosen.distance_label()
        )?;
        session.settle();
    }

    if request.save && session.save_current() {
        if let Some(pick) = session.current_pick() {
            writeln!(out, "Saved {}", pick.restaurant.name)?;
        }
    }
    Ok(())
}

/// Print favorites and the most recent picks
pub fn run_lists<W: Write>(profile: &ProfileArgs, settings: &Settings, out: &mut W) -> Result<(), CliError> {
    let session = open_session(settings, profile)?;

    writeln!(out, "Favorites:")?;
    if session.favorites().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for f in session.favorites() {
        writeln!(out, "  {} [{}] {} · ★ {:.1}", f.name, f.id, f.cuisine, f.rating)?;
    }

    writeln!(out, "History:")?;
    let rows = session.recent_history();
    if rows.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for row in rows {
        writeln!(
            out,
            "  {} {} {}",
            row.at.format("%Y-%m-%d %H:%M"),
            row.name,
            row.cuisine.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}

/// Remove a favorite by id
pub fn run_unfavorite<W: Write>(
    id: &str,
    profile: &ProfileArgs,
    settings: &Settings,
    out: &mut W,
) -> Result<(), CliError> {
    let mut session = open_session(settings, profile)?;
    if session.remove_favorite(id) {
        writeln!(out, "Removed {}", id)?;
    } else {
        writeln!(out, "{} was not a favorite", id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spin_args() {
        let cli = Cli::try_parse_from([
            "nomnom-wheel", "spin", "--cuisine", "Japanese", "--price", "$$", "--lat", "43.466", "--lng", "-80.519",
            "--count", "3",
        ])
        .unwrap();

        let Some(Command::Spin(args)) = cli.command else {
            panic!("expected spin");
        };
        let request = args.to_request();
        assert_eq!(request.criteria.cuisine.as_deref(), Some("Japanese"));
        assert_eq!(request.criteria.price, Some(PriceTier::Moderate));
        assert_eq!(request.origin, Some(Coordinates::new(43.466, -80.519)));
        assert_eq!(request.count, 3);
    }

    #[test]
    fn test_lat_requires_lng() {
        assert!(Cli::try_parse_from(["nomnom-wheel", "spin", "--lat", "43.4"]).is_err());
    }

    #[test]
    fn test_bad_price_rejected() {
        assert!(Cli::try_parse_from(["nomnom-wheel", "spin", "--price", "cheap"]).is_err());
    }

    #[test]
    fn test_diet_limited_to_known_tags() {
        let cli = Cli::try_parse_from(["nomnom-wheel", "spin", "--diet", "halal"]).unwrap();
        let Some(Command::Spin(args)) = cli.command else {
            panic!("expected spin");
        };
        assert_eq!(args.diet.as_deref(), Some("halal"));

        assert!(Cli::try_parse_from(["nomnom-wheel", "spin", "--diet", "paleo"]).is_err());
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["nomnom-wheel"]).unwrap();
        assert!(cli.command.is_none());
    }
}
