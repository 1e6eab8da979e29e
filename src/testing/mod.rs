//! Testing infrastructure (simulated module, delays).

pub(crate) mod mock;

pub(crate) use mock::{MockDelay, SimulatedEncoder};
