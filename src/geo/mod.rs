pub(crate) mod mercator;
pub(crate) mod projector;
