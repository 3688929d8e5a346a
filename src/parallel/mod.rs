pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, estimate_win_rate};
pub use pool::WorkerPool;
