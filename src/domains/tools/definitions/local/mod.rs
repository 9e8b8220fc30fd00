pub mod random;
pub mod time;

pub use random::RandomTool;
pub use time::TimeTool;
