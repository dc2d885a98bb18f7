pub(crate) mod reset_password;
pub(crate) mod sign_in;
pub(crate) mod sign_up;

pub use reset_password::*;
pub use sign_in::*;
pub use sign_up::*;
