/// Wire payloads exchanged with the identity service, limited to the fields
/// the response validators inspect. Deserialization happens inside the
/// request-provider implementation; validators only ever see these typed
/// payloads.
mod reset_password;
mod sign_in;
mod sign_up;

pub use reset_password::*;
pub use sign_in::*;
pub use sign_up::*;
