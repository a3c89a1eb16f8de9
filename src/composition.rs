pub(crate) mod model;
pub mod presets;
