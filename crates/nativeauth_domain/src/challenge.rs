use serde::{Deserialize, Serialize};

/// Challenge type declared by the server in a step response.
///
/// `Otp` is recognized on the wire but not implemented by this client;
/// validators reject it as a protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChallengeType {
    Oob,
    Password,
    Redirect,
    Otp,
}

/// Delivery channel for a one-time code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelType {
    Email,
    Phone,
}
