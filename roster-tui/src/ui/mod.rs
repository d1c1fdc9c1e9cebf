//! Terminal drawing primitives: a cell buffer, diffing terminal output and
//! normalized input events.

pub mod buffer;
pub mod event;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Rect, Rgb, Style};
pub use event::{Input, Key, Modifiers};
pub use terminal::Terminal;
