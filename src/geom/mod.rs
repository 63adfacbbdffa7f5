mod core;
mod surface;
mod trim;

pub use core::{Point3, Tolerance, Vec3};
pub use surface::{CylinderSurface, PlaneSurface, SphereSurface, Surface, TrimmedSurface};
pub use trim::{TrimError, TrimLoop, TrimRegion, UvDomain, UvPoint};

#[cfg(test)]
mod tests;
