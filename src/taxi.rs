use crate::config::TaxiConfig;
use crate::map::{TaxiMap, TaxiMapError};
use crate::mdp::Mdp;
use crate::{Continous, Discrete, Transition, Transitions};
use itertools::iproduct;
use log::debug;
use std::cmp::min;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

pub const SOUTH: Discrete = 0;
pub const NORTH: Discrete = 1;
pub const EAST: Discrete = 2;
pub const WEST: Discrete = 3;
pub const PICKUP: Discrete = 4;
pub const DROPOFF: Discrete = 5;

pub const N_ACTIONS: usize = 6;
pub const ACTION_NAMES: [&str; N_ACTIONS] =
    ["South", "North", "East", "West", "Pickup", "Dropoff"];

/// Passenger still waiting at the configured pickup cell.
pub const WAITING: usize = 0;
/// Passenger riding in the taxi.
pub const IN_TAXI: usize = 1;

#[derive(Debug, Error)]
pub enum TaxiEnvError {
    #[error(transparent)]
    Map(#[from] TaxiMapError),

    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no pickup locations configured")]
    NoPickupLocations,

    #[error("no destinations configured")]
    NoDestinations,

    #[error("pickup index {idx} out of range for {len} pickup locations")]
    PickupIndexOutOfRange { idx: usize, len: usize },

    #[error("destination index {idx} out of range for {len} destinations")]
    DestinationIndexOutOfRange { idx: usize, len: usize },

    #[error("pickup location ({row}, {col}) is outside the {n_rows}x{n_cols} grid")]
    PickupOffGrid {
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },

    #[error("destination ({row}, {col}) is outside the {n_rows}x{n_cols} grid")]
    DestinationOffGrid {
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },
}

/// The extended taxi problem, after "Hierarchical Reinforcement Learning
/// with the MAXQ Value Function Decomposition" by Tom Dietterich.
///
/// The taxi drives on an R x C grid, picks the passenger up at one of the
/// configured pickup cells and drops them at the configured destination.
/// Every step costs -1, illegal pickup/dropoff costs -10 and a successful
/// dropoff pays +20 and ends the episode.
///
/// The whole transition model is built eagerly at construction and is
/// immutable afterwards, so one environment can back any number of
/// episodes. States are the integers `0..n_s` with
/// `n_s = rows * cols * 2`; [`TaxiEnv::encode`] and [`TaxiEnv::decode`]
/// convert between a state id and its (row, col, passenger status,
/// destination index) parts.
#[derive(Debug)]
pub struct TaxiEnv {
    config: TaxiConfig,
    map: TaxiMap,
    n_s: usize,
    transitions: Rc<Transitions>,
    isd: Vec<Continous>,
}

impl TaxiEnv {
    pub fn new(config: TaxiConfig) -> Result<Self, TaxiEnvError> {
        let mut map = TaxiMap::parse(&config.map)?;
        let (n_rows, n_cols) = (map.n_rows(), map.n_cols());

        if config.locs.is_empty() {
            return Err(TaxiEnvError::NoPickupLocations);
        }
        if config.destinations.is_empty() {
            return Err(TaxiEnvError::NoDestinations);
        }
        if config.pass_idx >= config.locs.len() {
            return Err(TaxiEnvError::PickupIndexOutOfRange {
                idx: config.pass_idx,
                len: config.locs.len(),
            });
        }
        if config.dest_idx >= config.destinations.len() {
            return Err(TaxiEnvError::DestinationIndexOutOfRange {
                idx: config.dest_idx,
                len: config.destinations.len(),
            });
        }
        for &(row, col) in &config.locs {
            if row >= n_rows || col >= n_cols {
                return Err(TaxiEnvError::PickupOffGrid {
                    row,
                    col,
                    n_rows,
                    n_cols,
                });
            }
        }
        for &(row, col) in &config.destinations {
            if row >= n_rows || col >= n_cols {
                return Err(TaxiEnvError::DestinationOffGrid {
                    row,
                    col,
                    n_rows,
                    n_cols,
                });
            }
        }

        let pickup = config.locs[config.pass_idx];
        let destination = config.destinations[config.dest_idx];
        map.set_cell(pickup.0, pickup.1, 'P');
        map.set_cell(destination.0, destination.1, 'D');

        let n_s = n_rows * n_cols * 2;
        let mut transitions: Transitions = HashMap::with_capacity(n_s * N_ACTIONS);

        for (row, col, pass) in iproduct!(0..n_rows, 0..n_cols, [WAITING, IN_TAXI]) {
            let state = Self::encode_parts(n_rows, n_cols, row, col, pass);
            let taxi_loc = (row, col);

            for a in 0..N_ACTIONS as Discrete {
                let (mut new_row, mut new_col, mut new_pass) = (row, col, pass);
                let mut reward = -1.0;
                let mut done = false;

                match a {
                    SOUTH => new_row = min(row + 1, n_rows - 1),
                    NORTH => new_row = row.saturating_sub(1),
                    EAST if map.can_move_east(row, col) => new_col = col + 1,
                    WEST if map.can_move_west(row, col) => new_col = col - 1,
                    PICKUP => {
                        if pass == WAITING && taxi_loc == pickup {
                            new_pass = IN_TAXI;
                        } else {
                            // Wrong cell, or the passenger is already aboard.
                            reward = -10.0;
                        }
                    }
                    DROPOFF => {
                        if taxi_loc == destination && pass == IN_TAXI {
                            done = true;
                            reward = 20.0;
                        } else if pass == IN_TAXI && config.locs.contains(&taxi_loc) {
                            // Mid-route re-drop at a pickup cell. The
                            // two-status encoding has a single waiting
                            // value, so the passenger goes back to waiting
                            // no matter which pickup cell this is.
                            new_pass = WAITING;
                        } else {
                            reward = -10.0;
                        }
                    }
                    // A wall-blocked east/west move is a no-op.
                    _ => {}
                }

                let next_state = Self::encode_parts(n_rows, n_cols, new_row, new_col, new_pass);
                transitions.insert(
                    (state, a),
                    vec![Transition {
                        next_state,
                        probability: 1.0,
                        reward,
                        done,
                    }],
                );
            }
        }

        // Episodes start with the passenger still waiting, anywhere on the
        // grid with equal probability.
        let n_waiting = n_rows * n_cols;
        let mut isd = vec![0.0; n_s];
        for p in isd.iter_mut().take(n_waiting) {
            *p = 1.0 / n_waiting as Continous;
        }

        debug!(
            "built taxi mdp: {} states, {} actions, {} transition entries",
            n_s,
            N_ACTIONS,
            transitions.len()
        );

        Ok(Self {
            config,
            map,
            n_s,
            transitions: Rc::new(transitions),
            isd,
        })
    }

    fn encode_parts(n_rows: usize, n_cols: usize, row: usize, col: usize, pass: usize) -> Discrete {
        (n_cols * row + col + pass * n_rows * n_cols) as Discrete
    }

    /// Pack (row, col, passenger status) into a state id. The destination
    /// index is part of the signature for interface completeness but is
    /// not folded into the id: this environment has a single configured
    /// destination, so every state shares it.
    pub fn encode(&self, row: usize, col: usize, pass: usize, _dest_idx: usize) -> Discrete {
        assert!(
            row < self.map.n_rows() && col < self.map.n_cols() && pass <= IN_TAXI,
            "encode called with out-of-range parts ({row}, {col}, {pass})"
        );
        Self::encode_parts(self.map.n_rows(), self.map.n_cols(), row, col, pass)
    }

    /// Unpack a state id into (row, col, passenger status, destination
    /// index). Inverse of [`TaxiEnv::encode`] for every id in `0..n_s`;
    /// ids outside that range are a programming error.
    pub fn decode(&self, state: Discrete) -> (usize, usize, usize, usize) {
        let n_cells = self.map.n_rows() * self.map.n_cols();
        assert!(
            state >= 0 && (state as usize) < self.n_s,
            "state {state} out of range [0, {})",
            self.n_s
        );

        let s = state as usize;
        let (pass, cell) = if s >= n_cells {
            (IN_TAXI, s - n_cells)
        } else {
            (WAITING, s)
        };
        (
            cell / self.map.n_cols(),
            cell % self.map.n_cols(),
            pass,
            self.config.dest_idx,
        )
    }

    /// Initial-state distribution over `0..n_s`; sums to 1.0.
    pub fn isd(&self) -> &[Continous] {
        &self.isd
    }

    pub fn config(&self) -> &TaxiConfig {
        &self.config
    }

    pub fn map(&self) -> &TaxiMap {
        &self.map
    }
}

impl Mdp for TaxiEnv {
    fn n_s(&self) -> usize {
        self.n_s
    }

    fn n_a(&self) -> usize {
        N_ACTIONS
    }

    fn transitions(&self) -> Rc<Transitions> {
        Rc::clone(&self.transitions)
    }
}
