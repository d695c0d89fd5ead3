mod naming;
mod processor;

pub use naming::OutputNamer;
pub use processor::{BatchProcessor, convert};
