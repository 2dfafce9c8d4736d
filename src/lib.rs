//! Builds lp_solve integer programs picking the FanDuel lineup with the most
//! projected points under the salary cap.
//!
//! Players are read from a csv file, the ones projected under a threshold are
//! dropped and the rest become binary variables of a model with one count
//! constraint per position and one salary constraint.

pub mod error;
pub mod formulation;
pub mod generate;
pub mod instance;
pub mod loader;
pub mod rng;

pub use error::{Error, Result};
pub use formulation::{formulate, FormulationConfig, LpModel};
pub use instance::{Player, Position, Roster};
pub use loader::{load_players, read_players};
