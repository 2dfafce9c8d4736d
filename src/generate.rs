use std::{fs::File, io, path::PathBuf};

use clap::Args;
use rand::Rng;
use rand_distr::{Uniform, Normal, Distribution};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::instance::{Player, Position, Roster};
use crate::rng::seeded_rng;

#[derive(Debug, Args)]
pub struct RosterGenerator {
    /// An optional seed to kickstart the roster generation
    #[clap(short='s', long)]
    pub seed: Option<u128>,
    /// The number of quarterbacks
    #[clap(long, default_value="8")]
    pub qb: usize,
    /// The number of running backs
    #[clap(long, default_value="20")]
    pub rb: usize,
    /// The number of wide receivers
    #[clap(long, default_value="30")]
    pub wr: usize,
    /// The number of tight ends
    #[clap(long, default_value="10")]
    pub te: usize,
    /// The number of kickers
    #[clap(long, default_value="6")]
    pub k: usize,
    /// The number of defenses
    #[clap(long, default_value="8")]
    pub d: usize,
    /// The minimum salary of a player
    #[clap(long, default_value="4500")]
    pub min_salary: u64,
    /// The maximum salary of a player
    #[clap(long, default_value="9500")]
    pub max_salary: u64,
    /// Name of the csv file where to write the players
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// A generated csv row, using the column names the loader expects.
#[derive(Debug, Serialize)]
struct PlayerRow<'a> {
    #[serde(rename = "PLAYER")]
    name: &'a str,
    #[serde(rename = "POSITION")]
    position: Position,
    #[serde(rename = "SALARY")]
    salary: u64,
    #[serde(rename = "PROJECTION")]
    projection: f64,
}

impl RosterGenerator {

    pub fn generate(&self) -> Result<()> {
        let (mut rng, seed) = seeded_rng(self.seed);
        info!(seed, "generating players");

        let roster = self.generate_roster(&mut rng)?;

        if let Some(output) = self.output.as_ref() {
            let file = File::create(output).map_err(|source| Error::Output { path: output.clone(), source })?;
            write_players(&roster, file)?;
            info!("Wrote {} players to: {:?}", roster.len(), output);
        } else {
            write_players(&roster, io::stdout().lock())?;
        }
        Ok(())
    }

    pub fn count(&self, position: Position) -> usize {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::TE => self.te,
            Position::K  => self.k,
            Position::D  => self.d,
        }
    }

    pub fn generate_roster(&self, rng: &mut impl Rng) -> Result<Roster> {
        let (low, high) = self.salary_hundreds()?;
        let rand_salary = Uniform::new_inclusive(low, high);
        let mut roster = Roster::new();
        let mut id = 0_usize;

        for position in Position::ALL {
            let (mean, std_dev) = projection_profile(position);
            let rand_projection = Normal::new(mean, std_dev)
                .map_err(|e| Error::InvalidConfig(format!("cannot create normal dist: {e}")))?;

            for _ in 0..self.count(position) {
                let salary = rand_salary.sample(rng) * 100;
                let projection = (rand_projection.sample(rng) * 10.0).round() / 10.0;
                roster.push(Player { name: player_name(id), position, salary, projection });
                id += 1;
            }
        }

        Ok(roster)
    }

    /// The salary range in hundreds: every multiple of 100 between the
    /// minimum and maximum salary is a possible draw.
    fn salary_hundreds(&self) -> Result<(u64, u64)> {
        let low = self.min_salary / 100 + u64::from(self.min_salary % 100 != 0);
        let high = self.max_salary / 100;
        if self.min_salary == 0 || low > high {
            return Err(Error::InvalidConfig(format!(
                "salary range [{}, {}] holds no positive multiple of 100", self.min_salary, self.max_salary
            )));
        }
        Ok((low, high))
    }
}

/// Mean and std deviation of the fantasy points scored at a position.
fn projection_profile(position: Position) -> (f64, f64) {
    match position {
        Position::QB => (17.0, 4.0),
        Position::RB => (10.0, 4.5),
        Position::WR => (9.5, 4.5),
        Position::TE => (6.5, 3.0),
        Position::K  => (7.5, 1.5),
        Position::D  => (7.0, 3.0),
    }
}

/// `Player A`, ..., `Player Z`, `Player AA`, ...: names made of letters only
/// so no two of them share a variable name.
fn player_name(mut id: usize) -> String {
    let mut letters = vec![];
    loop {
        letters.push((b'A' + (id % 26) as u8) as char);
        if id < 26 {
            break;
        }
        id = id / 26 - 1;
    }
    letters.reverse();
    format!("Player {}", letters.into_iter().collect::<String>())
}

/// Writes players as csv with the `PLAYER, POSITION, SALARY, PROJECTION` header.
pub fn write_players<W: io::Write>(roster: &Roster, writer: W) -> Result<()> {
    let mut csv_wtr = csv::Writer::from_writer(writer);
    for player in roster.iter() {
        csv_wtr.serialize(PlayerRow {
            name: &player.name,
            position: player.position,
            salary: player.salary,
            projection: player.projection,
        })?;
    }
    csv_wtr.flush().map_err(Error::Write)?;
    Ok(())
}
