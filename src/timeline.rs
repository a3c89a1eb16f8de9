pub(crate) mod compositor;
pub(crate) mod dsl;
pub(crate) mod envelope;
pub(crate) mod model;
