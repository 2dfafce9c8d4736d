//! Assembles the 0/1 integer program selecting a lineup and renders it in
//! lp_solve's lp format.

use std::{collections::HashMap, fmt};

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::error::{Error, Result};
use crate::instance::{Player, Position, Roster};

pub const DEFAULT_SALARY_CAP: u64 = 60000;
pub const DEFAULT_MIN_PROJECTION: f64 = 2.718;
pub const DEFAULT_JITTER: f64 = 0.0;

/// The knobs of a formulation run. Only `new` and `default` build one, so a
/// config in hand is always valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulationConfig {
    salary_cap: u64,
    min_projection: f64,
    jitter: f64,
}

impl Default for FormulationConfig {
    fn default() -> Self {
        FormulationConfig {
            salary_cap: DEFAULT_SALARY_CAP,
            min_projection: DEFAULT_MIN_PROJECTION,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl FormulationConfig {
    pub fn new(salary_cap: u64, min_projection: f64, jitter: f64) -> Result<Self> {
        if salary_cap == 0 {
            return Err(Error::InvalidConfig("salary cap must be positive".to_string()));
        }
        if !min_projection.is_finite() {
            return Err(Error::InvalidConfig(format!("minimum projection {min_projection} is not a finite number")));
        }
        if !(0.0..1.0).contains(&jitter) {
            return Err(Error::InvalidConfig(format!("projection jitter {jitter} must lie in [0, 1)")));
        }
        Ok(FormulationConfig { salary_cap, min_projection, jitter })
    }

    pub fn salary_cap(&self) -> u64 {
        self.salary_cap
    }

    pub fn min_projection(&self) -> f64 {
        self.min_projection
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }
}

/// Maps a player to its lp variable: the position code, an underscore and
/// the ascii letters of the name with everything else dropped
/// (`"Le'Veon Bell"` at RB becomes `RB_LeVeonBell`).
pub fn variable_name(player: &Player) -> String {
    let letters = player.name.chars().filter(char::is_ascii_alphabetic).collect::<String>();
    format!("{}_{}", player.position, letters)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveTerm {
    pub coefficient: f64,
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionConstraint {
    pub position: Position,
    pub variables: Vec<String>,
}

impl PositionConstraint {
    pub fn rhs(&self) -> usize {
        self.position.required()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryTerm {
    pub salary: u64,
    pub variable: String,
}

/// A lineup selection model: maximize the (jittered) projected points of the
/// selected players, fill every position exactly and stay under the cap.
#[derive(Debug, Clone, PartialEq)]
pub struct LpModel {
    pub objective: Vec<ObjectiveTerm>,
    pub positions: Vec<PositionConstraint>,
    pub budget: Vec<SalaryTerm>,
    pub salary_cap: u64,
    pub binaries: Vec<String>,
}

impl LpModel {

    /// Builds the model for `roster`. Each objective coefficient is the
    /// player's projection scaled by a factor drawn uniformly from
    /// `[1 - jitter, 1 + jitter]`; `rng` is left untouched when jitter is 0.
    /// The projection threshold is not applied here.
    pub fn build(roster: &Roster, config: &FormulationConfig, rng: &mut impl Rng) -> Result<Self> {
        let (salary_cap, jitter) = (config.salary_cap, config.jitter);
        Self::check_feasible(roster)?;
        let variables = Self::assign_variables(roster)?;

        let factor = if jitter > 0.0 {
            Some(Uniform::new_inclusive(1.0 - jitter, 1.0 + jitter))
        } else {
            None
        };

        let mut objective = vec![];
        let mut budget = vec![];
        for (player, variable) in roster.iter().zip(variables.iter()) {
            let scale = match &factor {
                Some(uniform) => uniform.sample(rng),
                None => 1.0,
            };
            objective.push(ObjectiveTerm { coefficient: player.projection * scale, variable: variable.clone() });
            budget.push(SalaryTerm { salary: player.salary, variable: variable.clone() });
        }

        let mut remaining = variables.iter();
        let positions = Position::ALL.iter()
            .map(|position| PositionConstraint {
                position: *position,
                variables: remaining.by_ref().take(roster.players(*position).len()).cloned().collect(),
            })
            .collect();

        debug!(variables = variables.len(), salary_cap, jitter, "built lp model");

        Ok(LpModel { objective, positions, budget, salary_cap, binaries: variables })
    }

    /// Every position needs at least as many players as a lineup starts,
    /// otherwise its equality constraint can never hold.
    fn check_feasible(roster: &Roster) -> Result<()> {
        for position in Position::ALL {
            let available = roster.players(position).len();
            if available < position.required() {
                return Err(Error::InfeasibleRoster { position, required: position.required(), available });
            }
        }
        Ok(())
    }

    /// Names every player in roster order, failing when two players of a
    /// position collapse onto the same variable.
    fn assign_variables(roster: &Roster) -> Result<Vec<String>> {
        let mut owners: HashMap<String, &str> = HashMap::with_capacity(roster.len());
        let mut variables = Vec::with_capacity(roster.len());

        for player in roster.iter() {
            let variable = variable_name(player);
            if let Some(first) = owners.insert(variable.clone(), &player.name) {
                return Err(Error::VariableNameCollision {
                    variable,
                    first: first.to_string(),
                    second: player.name.clone(),
                });
            }
            variables.push(variable);
        }

        Ok(variables)
    }

    /// The lp statements in emission order: objective, one count constraint
    /// per position, the salary constraint and the binary declaration.
    pub fn statements(&self) -> Vec<String> {
        let mut statements = Vec::with_capacity(self.positions.len() + 3);

        statements.push(format!("max: {};", linear_sum(&self.objective)));

        for constraint in self.positions.iter() {
            statements.push(format!("{}: {} = {};", constraint.position.constraint_label(), constraint.variables.join(" + "), constraint.rhs()));
        }

        let budget = self.budget.iter().map(|t| format!("{} {}", t.salary, t.variable)).collect::<Vec<String>>();
        statements.push(format!("sal_lim: {} <= {};", budget.join(" + "), self.salary_cap));

        statements.push(format!("bin {};", self.binaries.join(" ")));
        statements
    }
}

impl fmt::Display for LpModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.statements() {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// `3 x + 2.5 y - 1 z`: negative coefficients after the first term are
/// written as a subtraction.
fn linear_sum(terms: &[ObjectiveTerm]) -> String {
    let mut out = String::new();
    for (i, ObjectiveTerm { coefficient, variable }) in terms.iter().enumerate() {
        let coefficient = *coefficient;
        if i == 0 {
            out.push_str(&format!("{coefficient} {variable}"));
        } else if coefficient < 0.0 {
            out.push_str(&format!(" - {} {variable}", -coefficient));
        } else {
            out.push_str(&format!(" + {coefficient} {variable}"));
        }
    }
    out
}
