//! Domain layer: entries, their identifiers, and per-client session state.

pub mod entry;
pub mod entry_id;
pub mod session_state;

pub use entry::Entry;
pub use entry_id::EntryId;
pub use session_state::{AuthState, SessionState};
