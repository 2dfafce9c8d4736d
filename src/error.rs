//! Error types for loading players and building the lp model

use std::path::PathBuf;

use thiserror::Error;

use crate::instance::Position;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write lp model: {0}")]
    Write(#[source] std::io::Error),

    #[error("malformed player data: {0}")]
    Csv(#[from] csv::Error),

    #[error("player data is missing the required column {column}")]
    MissingColumn { column: &'static str },

    #[error("line {line}: cannot parse {column} value {value:?} as {expected}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{}unknown position code {code:?} (expected one of QB, RB, WR, TE, K, D)", line_prefix(.line))]
    UnknownPosition { line: Option<u64>, code: String },

    #[error("position {position} needs {required} player(s) but only {available} remain after filtering")]
    InfeasibleRoster {
        position: Position,
        required: usize,
        available: usize,
    },

    #[error("players {first:?} and {second:?} both map to the lp variable {variable}")]
    VariableNameCollision {
        variable: String,
        first: String,
        second: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn line_prefix(line: &Option<u64>) -> String {
    line.map(|l| format!("line {l}: ")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;
