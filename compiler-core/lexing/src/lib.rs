//! Character and byte level input for the specification reader.

mod cursor;
mod scanner;

pub use cursor::Cursor;
pub use position::Position;
pub use scanner::{Scan, Scanner};
