pub mod batch;
pub mod geom;
pub mod shadow;
pub mod transform;

// Prelude
pub use geom::point::Point;
pub use geom::polygon::Polygon;
pub use geom::region::Region;
pub use geom::vector::Vector;
pub use shadow::{EffectiveArea, Panel, Quadrant, Shadow, ShadowCalculator};
pub use transform::{ObserverAngles, SphericalAngles};
