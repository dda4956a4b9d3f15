use crate::mdp::Mdp;
use crate::{Continous, Discrete, Transition, Transitions};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::rc::Rc;

pub trait Weighted {
    fn p(&self) -> Continous;
}

impl Weighted for Transition {
    fn p(&self) -> Continous {
        self.probability
    }
}

/// Sample one item from a weighted list. The taxi model is deterministic
/// (every list is a single p = 1.0 entry) but the driver stays generic so
/// a stochastic table drops in unchanged.
pub fn pick_next<'a, T: Weighted>(rng: &mut StdRng, ts: &'a [T]) -> &'a T {
    let dist = WeightedIndex::new(ts.iter().map(|t| t.p())).unwrap();
    &ts[dist.sample(rng)]
}

/// Outcome of a single simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    pub state: Discrete,
    pub reward: f64,
    pub done: bool,
}

/// Generic step/reset loop over a discrete transition table; the
/// composition replacement for the `DiscreteEnv` base class of the
/// original. Holds the only mutable pieces of the system: the current
/// state, the rng and the last action taken.
pub struct TableSimulator {
    transitions: Rc<Transitions>,
    n_s: usize,
    n_a: usize,
    isd: Vec<Continous>,
    rng: StdRng,
    state: Discrete,
    last_action: Option<Discrete>,
    done: bool,
}

impl TableSimulator {
    /// `isd` must cover every state and carry total mass 1.0; anything
    /// else is a programming error on the caller's side.
    pub fn new(mdp: Rc<dyn Mdp>, isd: Vec<Continous>, seed: Option<u64>) -> Self {
        assert_eq!(
            isd.len(),
            mdp.n_s(),
            "initial-state distribution must have one entry per state"
        );
        let mass: Continous = isd.iter().sum();
        assert!(
            (mass - 1.0).abs() < 1e-9,
            "initial-state distribution sums to {mass}, expected 1.0"
        );

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            transitions: mdp.transitions(),
            n_s: mdp.n_s(),
            n_a: mdp.n_a(),
            isd,
            rng,
            state: 0,
            last_action: None,
            done: false,
        };
        sim.reset();
        sim
    }

    /// Draw a fresh starting state from the initial-state distribution.
    pub fn reset(&mut self) -> Discrete {
        let dist = WeightedIndex::new(self.isd.iter().copied()).unwrap();
        self.state = dist.sample(&mut self.rng) as Discrete;
        self.last_action = None;
        self.done = false;
        self.state
    }

    /// Apply one action. Stepping a finished episode or passing an
    /// out-of-range action is a programming error.
    pub fn step(&mut self, action: Discrete) -> StepInfo {
        assert!(!self.done, "episode is finished, call reset first");
        assert!(
            (0..self.n_a as Discrete).contains(&action),
            "action {action} out of range [0, {})",
            self.n_a
        );

        let transitions = Rc::clone(&self.transitions);
        let ts = &transitions[&(self.state, action)];
        let t = pick_next(&mut self.rng, ts);

        self.state = t.next_state;
        self.last_action = Some(action);
        self.done = t.done;

        StepInfo {
            state: t.next_state,
            reward: t.reward,
            done: t.done,
        }
    }

    pub fn state(&self) -> Discrete {
        self.state
    }

    pub fn last_action(&self) -> Option<Discrete> {
        self.last_action
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn n_s(&self) -> usize {
        self.n_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    struct TX {
        s: usize,
        p: Continous,
        count: i32,
    }

    impl Weighted for TX {
        fn p(&self) -> Continous {
            self.p
        }
    }

    #[test]
    fn pick_next_follows_the_weights() {
        let items = &mut vec![
            TX {
                s: 0,
                p: 0.2,
                count: 0,
            },
            TX {
                s: 1,
                p: 0.8,
                count: 0,
            },
        ];

        let rng = &mut StdRng::from_entropy();
        let n = 10000;
        for _ in 0..n {
            let i = pick_next(rng, items).s;
            items[i].count += 1;
        }

        assert_float_eq!(items[0].count as f32 / n as f32, 0.2, abs <= 1e-2);
        assert_float_eq!(items[1].count as f32 / n as f32, 0.8, abs <= 1e-2);
    }

    #[test]
    fn pick_next_is_exact_for_a_point_mass() {
        let items = vec![TX {
            s: 7,
            p: 1.0,
            count: 0,
        }];
        let rng = &mut StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(pick_next(rng, &items).s, 7);
        }
    }
}
