//! Record form controllers
//!
//! One generic state machine drives every lifecycle page; the page
//! differences live entirely in [`shared::PageSchema`].

mod controller;
mod state;

pub use controller::{FormController, SearchOutcome, SubmitOutcome};
pub use state::FormState;
