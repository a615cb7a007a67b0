mod light;
mod plant;

pub use light::{LightChoice, LightOption};
pub use plant::{Collection, Field, Plant, PlantForm};
