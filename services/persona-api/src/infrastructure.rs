// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod persona_repository;

// Re-exports
pub use config::{ConfigError, DynamoDbConfig, LookupSettings};
pub use logging::init_logging;
pub use persona_repository::{
    decode_persona, DynamoPersonaRepository, PersonaRepository, RepositoryError,
};
