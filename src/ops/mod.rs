pub mod deadline;
pub mod script;
pub mod task_store;

pub use task_store::TaskStore;
