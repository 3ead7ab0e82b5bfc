pub mod manual;

pub use manual::{ManualAssignmentRequest, validate_manual_assignment};
