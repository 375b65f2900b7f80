//! Login form: gathers email and password, validates them locally and hands
//! them to the caller's submit handler. Invalid input never reaches the network.

use crate::{
    app::pages,
    auth::{SubmitOutcome, types::Credentials},
};
use anyhow::Result;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{collections::VecDeque, future::Future, io::Write};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Email and password are required.")]
    MissingFields,
    #[error("Enter a valid email address.")]
    InvalidEmail,
}

/// Where the form's field values come from.
pub trait FormInput {
    /// Next email/password pair, or `None` when no more input will come.
    ///
    /// # Errors
    /// Returns an error if the input source fails.
    fn next_submission(&mut self) -> Result<Option<(String, SecretString)>>;
}

/// Interactive prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl FormInput for TerminalInput {
    fn next_submission(&mut self) -> Result<Option<(String, SecretString)>> {
        let email: String = dialoguer::Input::new()
            .with_prompt("E-mail")
            .interact_text()?;
        let password = dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?;
        Ok(Some((email, SecretString::from(password))))
    }
}

/// Fixed list of submissions, used for non-interactive runs and tests.
#[derive(Default)]
pub struct ScriptedInput {
    submissions: VecDeque<(String, SecretString)>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_secret(email, SecretString::from(password.into()))
    }

    #[must_use]
    pub fn with_secret(mut self, email: impl Into<String>, password: SecretString) -> Self {
        self.submissions.push_back((email.into(), password));
        self
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.submissions.len()
    }
}

impl FormInput for ScriptedInput {
    fn next_submission(&mut self) -> Result<Option<(String, SecretString)>> {
        Ok(self.submissions.pop_front())
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Checks the raw field values and builds the credentials to submit.
///
/// # Errors
/// Returns `FormError` when a field is blank or the email is malformed.
pub fn validate(email: &str, password: SecretString) -> Result<Credentials, FormError> {
    let email = email.trim();
    if email.is_empty() || password.expose_secret().trim().is_empty() {
        return Err(FormError::MissingFields);
    }
    if !valid_email(email) {
        return Err(FormError::InvalidEmail);
    }

    Ok(Credentials {
        email: email.to_string(),
        password,
    })
}

/// Renders the form and feeds submissions to `on_submit` until one logs in.
///
/// Returns `true` once a submission succeeded and `false` when the input ran
/// out first.
///
/// # Errors
/// Returns an error if the input source or the output fails.
pub async fn run<I, W, F, Fut>(input: &mut I, out: &mut W, mut on_submit: F) -> Result<bool>
where
    I: FormInput,
    W: Write,
    F: FnMut(Credentials) -> Fut,
    Fut: Future<Output = SubmitOutcome>,
{
    pages::render_login(out)?;

    while let Some((email, password)) = input.next_submission()? {
        let credentials = match validate(&email, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                pages::render_error(out, &err.to_string())?;
                continue;
            }
        };

        match on_submit(credentials).await {
            SubmitOutcome::LoggedIn => return Ok(true),
            SubmitOutcome::Rejected { message } => pages::render_error(out, &message)?,
            SubmitOutcome::InFlight => {}
        }
    }

    Ok(false)
}
