pub mod document;
pub mod event;
pub mod interval;
pub mod tier;

pub use document::*;
pub use event::*;
pub use interval::*;
pub use tier::*;
