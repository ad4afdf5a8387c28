//! Roof-wall integration engine for 2D house plans.
//!
//! [`RoofPitchCalculator`] converts between pitch representations and derives
//! roof geometry. [`RoofWallIntegrationSystem2D`] finds where roof outlines
//! meet walls and classifies each roof-wall connection.

pub mod error;
pub mod integration;
pub mod math;
pub mod model;
pub mod pitch;

pub use error::{RooflineError, Result};
pub use integration::{RoofWallIntegrationConfig, RoofWallIntegrationSystem2D};
pub use model::{Roof2D, Wall2D};
pub use pitch::RoofPitchCalculator;
