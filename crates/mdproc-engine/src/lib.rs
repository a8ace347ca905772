pub mod io;
pub mod processor;

// Re-export key types for easier usage
pub use io::*;
pub use processor::*;
