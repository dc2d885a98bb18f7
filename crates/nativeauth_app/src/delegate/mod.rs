/// Per-state delegate contracts and their dispatchers. Each trait declares
/// exactly the callbacks reachable from its continuation point; dispatch is a
/// single exhaustive match, so every invocation delivers exactly one callback.
pub(crate) mod reset_password;
pub(crate) mod sign_in;
pub(crate) mod sign_up;

pub use reset_password::{
    ResetPasswordRequiredDelegate, ResetPasswordResendCodeDelegate, ResetPasswordStartDelegate,
    ResetPasswordVerifyCodeDelegate,
};
pub use sign_in::{
    SignInAfterResetPasswordDelegate, SignInPasswordRequiredDelegate, SignInPasswordStartDelegate,
    SignInResendCodeDelegate, SignInStartDelegate, SignInVerifyCodeDelegate,
};
pub use sign_up::{
    SignUpAttributesRequiredDelegate, SignUpPasswordRequiredDelegate, SignUpResendCodeDelegate,
    SignUpStartDelegate, SignUpVerifyCodeDelegate,
};
