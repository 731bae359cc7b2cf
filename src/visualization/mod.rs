pub mod escape;
pub mod generator;
pub mod page;
pub mod templates;

pub use generator::*;
pub use page::*;
