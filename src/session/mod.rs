pub mod mode_session;
pub mod registry;

pub use mode_session::ModeSession;
pub use registry::SessionRegistry;
