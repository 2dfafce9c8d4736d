use std::{fs, io::{self, Write}, path::PathBuf};

use clap::Args;
use rand::Rng;
use tracing::info;

use crate::error::{Error, Result};
use crate::instance::{Position, Roster};
use crate::loader::load_players;
use crate::rng::seeded_rng;

pub mod model;

pub use model::{
    variable_name, FormulationConfig, LpModel, ObjectiveTerm, PositionConstraint, SalaryTerm,
    DEFAULT_JITTER, DEFAULT_MIN_PROJECTION, DEFAULT_SALARY_CAP,
};

#[derive(Debug, Args)]
pub struct Formulate {
    /// The csv file containing player data (PLAYER, POSITION, SALARY, PROJECTION)
    pub player_data_file: PathBuf,
    /// The team salary cap restriction
    #[clap(long, default_value_t = DEFAULT_SALARY_CAP)]
    pub salary_cap: u64,
    /// Minimum point projection required to consider a player
    #[clap(long, default_value_t = DEFAULT_MIN_PROJECTION)]
    pub min_player_proj: f64,
    /// Random relative adjustment applied to every player projection, in [0, 1)
    #[clap(long, default_value_t = DEFAULT_JITTER)]
    pub proj_jitter: f64,
    /// An optional seed making the projection jitter reproducible
    #[clap(short='s', long)]
    pub seed: Option<u128>,
    /// If present, the path where to write the lp model instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

impl Formulate {

    pub fn config(&self) -> Result<FormulationConfig> {
        FormulationConfig::new(self.salary_cap, self.min_player_proj, self.proj_jitter)
    }

    /// Loads the players, builds the model and writes it out. Nothing is
    /// written unless the whole model could be built.
    pub fn formulate(&self) -> Result<()> {
        let config = self.config()?;
        let roster = load_players(&self.player_data_file)?;

        let (mut rng, seed) = seeded_rng(self.seed);
        if config.jitter() > 0.0 {
            info!(seed, jitter = config.jitter(), "jittering projections");
        }

        let model = formulate(&roster, &config, &mut rng)?;
        let lp = model.to_string();

        if let Some(output) = self.output.as_ref() {
            fs::write(output, lp.as_bytes()).map_err(|source| Error::Output { path: output.clone(), source })?;
            info!("Wrote lp model to: {:?}", output);
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(lp.as_bytes()).and_then(|_| stdout.flush()).map_err(Error::Write)?;
        }
        Ok(())
    }
}

/// Drops the players projected under the configured minimum and builds the
/// lineup model for the rest.
pub fn formulate(roster: &Roster, config: &FormulationConfig, rng: &mut impl Rng) -> Result<LpModel> {
    let kept = roster.retain_min_projection(config.min_projection());

    for position in Position::ALL {
        info!(
            "{}: kept {} of {} players projected at least {}",
            position,
            kept.players(position).len(),
            roster.players(position).len(),
            config.min_projection()
        );
    }

    LpModel::build(&kept, config, rng)
}
