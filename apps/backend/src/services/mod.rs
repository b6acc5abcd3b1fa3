pub mod game_flow;
pub mod reaper;
pub mod registry;
pub mod session;

pub use game_flow::DrawOutcome;
pub use registry::{SessionRegistry, SharedSession};
pub use session::Session;
