//! Roof pitch conversions, roof geometry and drainage sizing.

mod calculator;
mod data;
mod drainage;
pub mod tables;

pub use calculator::{PitchCalculatorConfig, RoofPitchCalculator};
pub use data::{PitchCategory, PitchUnit, PitchValidation, RoofGeometry, RoofPitchData};
pub use drainage::{DrainageRequirements, DrainageType};
