//! Session state machine (§4.4), generalised from the teacher's IMAP
//! `State` enum (`Greeting`/`NotAuthenticated`/`Authenticated`/`Selected`)
//! down to this protocol's simpler four states: there is no per-object
//! "selected" state here, only connected-vs-not and authenticated-vs-not.
//!
//! ```text
//! Disconnected --connect--> Greeted --login--> Authenticated
//!     ^                        |                    |
//!     |                        +---- operations -----+
//!     |                                               |
//!     +------------------ logout --------------------+
//!     ^
//!     +--- close, from any state
//!
//! any state --fatal (>=2500 or I/O error)--> Broken; caller must close
//! ```

/// Where a [`crate::client::Client`] handle sits in its connection
/// lifecycle. Operations other than `connect`/`login`/`close` check this
/// before doing network I/O so a caller gets an immediate, local error
/// instead of a confusing server round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No stream open yet, or `close` has torn one down.
    Disconnected,

    /// Stream open, greeting captured, not yet logged in.
    Greeted,

    /// Logged in; operations may be issued.
    Authenticated,

    /// A fatal server result or I/O error occurred; the stream (if any)
    /// must be closed before the handle can be used again.
    Broken,
}

impl State {
    pub fn is_connected(&self) -> bool {
        !matches!(self, State::Disconnected)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, State::Authenticated)
    }
}
