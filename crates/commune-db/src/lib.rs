pub mod migrations;
pub mod pool;
pub mod seed;
pub mod setup;

pub use migrations::{
    catalog, detect_capabilities, Capabilities, Capability, Migration, MigrationRunner,
};
pub use pool::Database;
pub use seed::{seed, SeedReport};
pub use setup::setup;
