//! Reads player projections from a csv file with the columns
//! `PLAYER, POSITION, SALARY, PROJECTION`. Any other column is ignored.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::instance::{Player, Position, Roster};

pub const PLAYER_COLUMN: &str = "PLAYER";
pub const POSITION_COLUMN: &str = "POSITION";
pub const SALARY_COLUMN: &str = "SALARY";
pub const PROJECTION_COLUMN: &str = "PROJECTION";

const REQUIRED_COLUMNS: [&str; 4] = [PLAYER_COLUMN, POSITION_COLUMN, SALARY_COLUMN, PROJECTION_COLUMN];

/// One csv row before any of its fields is interpreted.
#[derive(Debug, Deserialize)]
struct PlayerRow {
    #[serde(rename = "PLAYER")]
    name: String,
    #[serde(rename = "POSITION")]
    position: String,
    #[serde(rename = "SALARY")]
    salary: String,
    #[serde(rename = "PROJECTION")]
    projection: String,
}

impl PlayerRow {
    fn into_player(self, line: u64) -> Result<Player> {
        let position = self.position.parse::<Position>()
            .map_err(|_| Error::UnknownPosition { line: Some(line), code: self.position.clone() })?;
        let salary = self.salary.parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| Error::InvalidNumber { line, column: SALARY_COLUMN, value: self.salary.clone(), expected: "a positive integer" })?;
        let projection = self.projection.parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| Error::InvalidNumber { line, column: PROJECTION_COLUMN, value: self.projection.clone(), expected: "a finite number" })?;

        Ok(Player { name: self.name, position, salary, projection })
    }
}

/// Loads the players of the csv file at `path`, grouped by position.
pub fn load_players<P: AsRef<Path>>(path: P) -> Result<Roster> {
    let path = path.as_ref();
    info!("Loading player data from: {:?}", path);

    let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let roster = read_players(file)?;

    info!("Loaded {} players", roster.len());
    Ok(roster)
}

/// Parses players from any csv source. Fails on the first bad row.
pub fn read_players<R: Read>(source: R) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    check_headers(&headers)?;

    let mut roster = Roster::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: PlayerRow = record.deserialize(Some(&headers))?;
        let player = row.into_player(line)?;
        debug!(line, name = %player.name, position = %player.position, "parsed player");
        roster.push(player);
    }

    Ok(roster)
}

fn check_headers(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn { column });
        }
    }
    Ok(())
}
