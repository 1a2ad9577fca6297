pub(crate) mod base;
pub(crate) mod quad;
pub(crate) mod registry;
