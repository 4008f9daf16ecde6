use std::fmt;

use crate::entities::ActorId;

/// Invariant violations inside the simulation.  Reachable gameplay states
/// (no fire target, a miss, the last life lost) are never errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The fire selector points at an invader the wave no longer holds.
    StaleFireTarget { target: ActorId },
    /// The fire target resolved to something that is not an invader.
    FireTargetNotInvader { target: ActorId },
    /// A culled invader was missing from the wave list.
    UntrackedInvader { id: ActorId },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleFireTarget { target } => {
                write!(f, "fire target {} is not part of the wave", target.0)
            }
            Self::FireTargetNotInvader { target } => {
                write!(f, "fire target {} is not an invader", target.0)
            }
            Self::UntrackedInvader { id } => {
                write!(f, "culled invader {} was not tracked by the wave", id.0)
            }
        }
    }
}

impl std::error::Error for SimError {}
