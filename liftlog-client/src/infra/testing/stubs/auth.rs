use async_trait::async_trait;
use liftlog_model::Identity;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::domains::auth::security::SecureCredential;
use crate::infra::services::{
    ServiceError, ServiceResult,
    auth::{AccountService, Authenticator},
};

/// [`Authenticator`] that accepts one known password
#[derive(Debug, Clone)]
pub struct StubAuthenticator {
    user: Identity,
    password: SecureCredential,
    failure: Option<ServiceError>,
    attempts: Arc<Mutex<Vec<String>>>,
}

impl StubAuthenticator {
    pub fn accepting(user: Identity, password: &str) -> Self {
        Self {
            user,
            password: SecureCredential::from(password),
            failure: None,
            attempts: Arc::default(),
        }
    }

    /// Every attempt fails with `err`
    pub fn failing(user: Identity, err: ServiceError) -> Self {
        Self {
            failure: Some(err),
            ..Self::accepting(user, "")
        }
    }

    /// E-mails of every sign-in attempt, in order
    pub fn attempts(&self) -> Vec<String> {
        lock(&self.attempts).clone()
    }
}

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecureCredential,
    ) -> ServiceResult<Identity> {
        lock(&self.attempts).push(email.to_string());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if email != self.user.email || password != &self.password {
            return Err(ServiceError::Application(
                "Incorrect email/password combination".to_string(),
            ));
        }
        Ok(self.user.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StubAccountService {
    results: Arc<Mutex<VecDeque<ServiceResult<()>>>>,
    registrations: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_result(&self, result: ServiceResult<()>) -> &Self {
        lock(&self.results).push_back(result);
        self
    }

    /// `(name, email)` of every registration attempt
    pub fn registrations(&self) -> Vec<(String, String)> {
        lock(&self.registrations).clone()
    }
}

#[async_trait]
impl AccountService for StubAccountService {
    async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &SecureCredential,
    ) -> ServiceResult<()> {
        lock(&self.registrations).push((name.to_string(), email.to_string()));
        lock(&self.results).pop_front().unwrap_or(Ok(()))
    }
}
