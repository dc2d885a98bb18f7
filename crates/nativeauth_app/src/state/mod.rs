/// Continuation states: immutable snapshots a caller holds while a flow is
/// suspended. Every operation consumes the state's guard up front, so an
/// abandoned or already-used state can never replay a continuation token.
mod guard;
pub(crate) mod reset_password;
pub(crate) mod sign_in;
pub(crate) mod sign_up;

pub(crate) use guard::FlowGuard;
pub use reset_password::*;
pub use sign_in::*;
pub use sign_up::*;
