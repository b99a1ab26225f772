pub mod registry;
pub mod weights;
