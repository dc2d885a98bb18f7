use derive_setters::Setters;
use serde_json::{Map, Value};

use crate::{CorrelationId, Password, Username};

/// Parameters for one sign-up invocation. Built once per public call and
/// owned by the flow controller for the lifetime of that invocation.
#[derive(Debug, Clone, Setters)]
#[setters(strip_option, into)]
pub struct SignUpParameters {
    #[setters(skip)]
    pub username: Username,
    pub password: Option<Password>,
    pub attributes: Option<Map<String, Value>>,
    #[setters(skip)]
    pub correlation_id: CorrelationId,
}

impl SignUpParameters {
    pub fn new(username: impl Into<Username>) -> Self {
        Self {
            username: username.into(),
            password: None,
            attributes: None,
            correlation_id: CorrelationId::new(),
        }
    }
}

/// Parameters for one sign-in invocation.
#[derive(Debug, Clone, Setters)]
#[setters(strip_option, into)]
pub struct SignInParameters {
    #[setters(skip)]
    pub username: Username,
    pub password: Option<Password>,
    pub scopes: Vec<String>,
    #[setters(skip)]
    pub correlation_id: CorrelationId,
}

impl SignInParameters {
    pub fn new(username: impl Into<Username>) -> Self {
        Self {
            username: username.into(),
            password: None,
            scopes: Vec::new(),
            correlation_id: CorrelationId::new(),
        }
    }
}

/// Parameters for one reset-password invocation.
#[derive(Debug, Clone)]
pub struct ResetPasswordParameters {
    pub username: Username,
    pub correlation_id: CorrelationId,
}

impl ResetPasswordParameters {
    pub fn new(username: impl Into<Username>) -> Self {
        Self { username: username.into(), correlation_id: CorrelationId::new() }
    }
}
