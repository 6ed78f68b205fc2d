//! Interactive multi-step flows.
//!
//! Each flow is an explicit state value with a pure transition function, so
//! it can be tested without any view. The async helpers next to each flow
//! send the resulting request to the [`DataBackend`](crate::DataBackend) and
//! apply its answer.

pub mod foul;
pub mod free_throw;
pub mod shot_entry;
pub mod substitution;
pub mod timer;

pub use foul::{
    reduce as reduce_foul, submit_foul, BonusState, FoulEvent, FoulOutcome, FoulStep, FoulType,
    FreeThrowAward, ShotType,
};
pub use free_throw::{record_free_throw, FreeThrowSequence, FreeThrowState};
pub use shot_entry::{record_shot, ShotEntry};
pub use substitution::{
    execute_substitution, SubstitutionCommand, SubstitutionEvent, SubstitutionPanel, COURT_SLOTS,
};
pub use timer::DismissTimer;
