use crate::Transitions;
use std::rc::Rc;

/// Markov Decision Process - Sutton & Barto 2018.
///
/// The narrow surface consumed by the simulation driver and the renderer:
/// state/action counts plus the read-only transition model. Composition
/// over the table replaces the class inheritance of the original
/// `DiscreteEnv` base.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn transitions(&self) -> Rc<Transitions>;
}
