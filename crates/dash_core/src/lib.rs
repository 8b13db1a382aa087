pub mod animation;
pub mod input;
pub mod rect;
pub mod time;

pub use animation::AnimFrame;
pub use rect::Rect;
