pub mod cache;
pub mod date;
pub mod enums;
pub mod schedule;

pub use cache::*;
pub use date::*;
pub use enums::*;
pub use schedule::*;
