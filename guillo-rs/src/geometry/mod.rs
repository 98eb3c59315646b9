/// Primitive geometric shapes
pub mod primitives;

mod orientation;

#[doc(inline)]
pub use orientation::Orientation;
