//! This module defines an abstract representation of a player pool: the
//! roster positions, the players and the roster grouping them by position.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::error::Error;

/// A FanDuel roster slot. The declaration order is the emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    D,
}

impl Position {
    pub const ALL: [Position; 6] = [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::D];

    /// The number of players of this position a lineup must contain
    pub fn required(self) -> usize {
        match self {
            Position::QB => 1,
            Position::RB => 2,
            Position::WR => 3,
            Position::TE => 1,
            Position::K  => 1,
            Position::D  => 1,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K  => "K",
            Position::D  => "D",
        }
    }

    /// Label of the position-count constraint in the lp file
    pub fn constraint_label(self) -> &'static str {
        match self {
            Position::QB => "qb_lim",
            Position::RB => "rb_lim",
            Position::WR => "wr_lim",
            Position::TE => "te_lim",
            Position::K  => "k_lim",
            Position::D  => "d_lim",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Position::ALL.iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or_else(|| Error::UnknownPosition { line: None, code: code.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub salary: u64,
    pub projection: f64,
}

/// The player pool grouped by position. Players keep their insertion order
/// within a position and positions are visited in `Position::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    by_position: BTreeMap<Position, Vec<Player>>,
}

impl Roster {
    pub fn new() -> Self {
        let by_position = Position::ALL.iter().map(|p| (*p, vec![])).collect();
        Roster { by_position }
    }

    pub fn push(&mut self, player: Player) {
        self.by_position.entry(player.position).or_default().push(player);
    }

    pub fn players(&self, position: Position) -> &[Player] {
        self.by_position.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every player, QB first and D last
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.by_position.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_position.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a new roster keeping only the players projected to score at
    /// least `threshold` points.
    pub fn retain_min_projection(&self, threshold: f64) -> Roster {
        let by_position = self.by_position.iter()
            .map(|(position, players)| {
                let kept = players.iter()
                    .filter(|p| p.projection >= threshold)
                    .cloned()
                    .collect::<Vec<Player>>();
                (*position, kept)
            })
            .collect();
        Roster { by_position }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut roster = Roster::new();
        iter.into_iter().for_each(|p| roster.push(p));
        roster
    }
}
