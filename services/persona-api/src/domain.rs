// Domain layer modules
pub mod persona;
pub mod persona_name;

// Re-exports
pub use persona::{Affinities, Persona, PersonaSkill, PersonaStats, NEUTRAL_AFFINITY};
pub use persona_name::{PersonaName, PersonaNameError};
