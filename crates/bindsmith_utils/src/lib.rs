pub mod logger;
pub mod profiler;

pub use logger::init_logging;
pub use profiler::{PhaseTiming, Profiler};
