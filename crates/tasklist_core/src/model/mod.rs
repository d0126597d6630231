mod filter;
mod task;

pub use filter::Filter;
pub use task::{Task, TaskId};
