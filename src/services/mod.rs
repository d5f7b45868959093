pub mod roster;

pub use roster::{Draft, DraftField, DraftMode, MutationOutcome, RosterViewModel};
