mod driver;
mod plan;

pub use driver::{FrameDriver, RenderSetup, TickOutcome};
pub use plan::{CLEAR_COLOR, FramePlan, PassCommand};
