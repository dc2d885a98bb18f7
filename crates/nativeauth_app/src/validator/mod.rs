/// Response validators: pure, total, deterministic classification of one
/// network round trip into the closed outcome set for that step kind. No I/O,
/// no state; the correlation id is only used for log lines.
pub mod reset_password;
pub mod sign_in;
pub mod sign_up;
