//! Suggest a commit message for staged changes and commit it on approval.

pub mod confirm;
pub mod flow;

pub use confirm::{Confirmer, TerminalConfirmer, is_affirmative};
pub use flow::{DefaultFactory, Outcome, ProviderFactory, SuggestFlow};
