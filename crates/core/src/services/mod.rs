pub mod identify;
pub mod pipeline;
