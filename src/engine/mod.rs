pub mod controller;
pub mod shuffle;
pub mod validator;

pub use controller::{
    ConfirmReset, Confirmation, DrillController, DrillEvent, Feedback, Phase, PresentationSink,
};
pub use validator::Verdict;
