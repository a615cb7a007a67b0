mod config_cmd;
mod plant;

pub use config_cmd::ConfigCommand;
pub use plant::{OutputFormat, PlantSubcommand};
