pub mod scan;
pub mod seekers;
pub mod tools;

pub use scan::*;
pub use seekers::*;
pub use tools::*;
