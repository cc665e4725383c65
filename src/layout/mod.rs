//! Overlay geometry: content-driven auto-sizing, work-area placement and
//! drag coordinate mapping.

pub mod auto_size;
pub mod bounds;
pub mod drag;
pub mod geometry;

pub use auto_size::{compute_auto_size, AutoSizeInput};
pub use bounds::{compute_bounds, resolve_target_display};
pub use drag::{CommitThrottle, DragSurface};
pub use geometry::{Rect, Size};
