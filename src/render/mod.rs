pub(crate) mod builder;
pub(crate) mod dispatch;
pub(crate) mod raster;
pub(crate) mod request;
pub(crate) mod svg;
