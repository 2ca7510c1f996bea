mod color;
mod edges;
mod enums;
mod style;

pub use color::{Color, Rgb};
pub use edges::Edges;
pub use enums::{
    Align, Backdrop, Border, Direction, Justify, Position, Size, TextAlign, TextStyle, TextWrap,
};
pub use style::Style;
