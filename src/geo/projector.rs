use crate::foundation::{
    core::{GeoCoord, Point},
    error::QuadResult,
};

/// Maps geographic coordinates into display space.
///
/// Implementations are expected to be pure: projecting the same coordinate twice yields the same
/// point. A coordinate that cannot be mapped is reported as an error and aborts the build that
/// asked for it.
pub trait Projector {
    /// Project `coord` into display space (pixels, origin top-left, +y down).
    fn project(&self, coord: GeoCoord) -> QuadResult<Point>;
}

/// Projector that passes `x`/`y` through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityProjector;

impl Projector for IdentityProjector {
    fn project(&self, coord: GeoCoord) -> QuadResult<Point> {
        Ok(Point::new(coord.x, coord.y))
    }
}

impl<P: Projector + ?Sized> Projector for &P {
    fn project(&self, coord: GeoCoord) -> QuadResult<Point> {
        (**self).project(coord)
    }
}
