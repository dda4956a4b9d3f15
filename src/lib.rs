extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod config;
pub mod map;
pub mod mdp;
pub mod render;
pub mod simulator;
pub mod taxi;

use std::collections::HashMap;

pub type Discrete = i32;
pub type Continous = f64;

/// One possible outcome of taking an action in a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next_state: Discrete,
    pub probability: Continous,
    pub reward: f64,
    pub done: bool,
}

/// Full transition model keyed by (state, action).
/// Probabilities for a fixed key sum to 1.0; the taxi environment is
/// deterministic, so every entry holds exactly one transition with p = 1.0.
pub type Transitions = HashMap<(Discrete, Discrete), Vec<Transition>>;

pub use config::TaxiConfig;
pub use map::{TaxiMap, TaxiMapError};
pub use mdp::Mdp;
pub use render::{render, RenderFrame};
pub use simulator::{StepInfo, TableSimulator};
pub use taxi::{TaxiEnv, TaxiEnvError};
