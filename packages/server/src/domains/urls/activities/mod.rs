pub mod run_check;
pub mod submit_url;

pub use run_check::{run_check, CheckOutcome};
pub use submit_url::{submit_url, SubmitOutcome};
