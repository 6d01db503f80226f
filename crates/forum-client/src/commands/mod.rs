//! State mutators, grouped by domain.
//!
//! Each sub-module adds methods to [`Forum`](crate::state::Forum). A mutator
//! checks its preconditions before touching anything, so a refused call
//! leaves the state as it was. A successful call saves the whole state and
//! re-renders the views it affects.

pub mod backup;
pub mod media;
pub mod messaging;
pub mod posts;
pub mod profile;
pub mod search;
pub mod settings;
