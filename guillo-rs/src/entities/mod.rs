mod container;
mod cut;
mod rectangle;

#[doc(inline)]
pub use container::Container;
#[doc(inline)]
pub use cut::Cut;
#[doc(inline)]
pub use rectangle::Piece;
#[doc(inline)]
pub use rectangle::Rectangle;
