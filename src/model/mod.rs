//! Plan records the engine reads and annotates.
//!
//! These mirror the records owned by the editor's design state. The engine
//! only reads the geometric fields and writes connection ids into the
//! metadata of cloned values.

pub mod roof;
pub mod wall;

pub use roof::{Dimensions, Roof2D, RoofMetadata, Transform2D};
pub use wall::{Wall2D, WallMetadata};
