//! Email + one-time-code login flow
//!
//! `AwaitingEmail --submit_email--> AwaitingCode(email) --submit_code--> authenticated`,
//! with `go_back` returning to the email step and `logout` resetting everything.

use std::sync::atomic::Ordering;

use super::{Assistant, InFlight};
use crate::error::{AssistantError, Operation, Result};
use crate::transport::Transport;
use crate::types::{AuthFlowState, ChatStatistics, Session, StatusKind, UiEvent};
use crate::validation::{validate_code, validate_email};

const SENDING_CODE: &str = "Sending verification code...";
const CODE_SENT: &str = "Verification code sent to your email";
const SEND_CODE_FAILED: &str = "Failed to send verification code. Please try again.";
const VERIFYING: &str = "Verifying code...";
const VERIFIED: &str = "Authentication successful!";
const VERIFY_FAILED: &str = "Verification failed. Please try again.";

impl<T: Transport> Assistant<T> {
    /// Request a one-time code for `email`
    ///
    /// Valid only while awaiting an email. Malformed addresses are rejected
    /// without a network call.
    ///
    /// # Errors
    /// `Validation`, `InvalidState`, `Busy`, or the backend failure
    pub async fn submit_email(&self, email: &str) -> Result<()> {
        let email = match validate_email(email) {
            Ok(email) => email.to_string(),
            Err(e) => {
                self.auth_status(e.to_string(), StatusKind::Error);
                return Err(e.into());
            }
        };
        if self.state.lock().auth != AuthFlowState::AwaitingEmail {
            return Err(AssistantError::invalid_state(
                "a verification code is already pending",
            ));
        }
        let _in_flight = InFlight::acquire(&self.auth_in_flight, Operation::Auth)?;
        let epoch = self.current_epoch();

        self.auth_status(SENDING_CODE, StatusKind::Info);
        match self.api.initiate_auth(&email).await {
            Ok(_) => {
                {
                    let mut state = self.state.lock();
                    if self.current_epoch() != epoch || state.auth != AuthFlowState::AwaitingEmail {
                        return Err(AssistantError::invalid_state(
                            "login flow changed while the code was being sent",
                        ));
                    }
                    state.auth = AuthFlowState::AwaitingCode {
                        email: email.clone(),
                    };
                }
                log::info!("Verification code requested for {email}");
                self.emit(UiEvent::ShowCodeStep { email });
                self.auth_status(CODE_SENT, StatusKind::Success);
                Ok(())
            }
            Err(e) => {
                log::warn!("Initiating login failed: {e}");
                self.auth_status(e.user_message(SEND_CODE_FAILED), StatusKind::Error);
                Err(e)
            }
        }
    }

    /// Verify the one-time code for the pending email
    ///
    /// On success the session becomes authenticated, the main view is shown,
    /// and the user identity is fetched. The flow stays at the code step until
    /// `go_back` or `logout`.
    ///
    /// # Errors
    /// `Validation`, `InvalidState`, `Busy`, or the backend failure
    pub async fn submit_code(&self, code: &str) -> Result<()> {
        let email = self.state.lock().auth.pending_email().map(str::to_owned);
        let Some(email) = email else {
            return Err(AssistantError::invalid_state("no verification code was requested"));
        };
        let code = match validate_code(code) {
            Ok(code) => code,
            Err(e) => {
                self.auth_status(e.to_string(), StatusKind::Error);
                return Err(e.into());
            }
        };
        let _in_flight = InFlight::acquire(&self.auth_in_flight, Operation::Auth)?;
        let epoch = self.current_epoch();

        self.auth_status(VERIFYING, StatusKind::Info);
        let verified = self.api.verify_code(&email, code).await;
        if self.current_epoch() != epoch {
            return Err(signed_out_during_login());
        }
        if let Err(e) = verified {
            log::warn!("Code verification failed for {email}: {e}");
            self.auth_status(e.user_message(VERIFY_FAILED), StatusKind::Error);
            return Err(e);
        }

        self.auth_status(VERIFIED, StatusKind::Success);
        let delay = self.options.auth_transition_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        {
            let mut state = self.state.lock();
            if self.current_epoch() != epoch {
                return Err(signed_out_during_login());
            }
            state.session.authenticated = true;
        }
        log::info!("Authenticated as {email}");
        self.emit(UiEvent::ShowMainView);
        self.refresh_user(epoch).await;
        Ok(())
    }

    /// Return from the code step to the email step
    ///
    /// No-op while already awaiting an email.
    pub fn go_back(&self) {
        {
            let mut state = self.state.lock();
            if state.auth == AuthFlowState::AwaitingEmail {
                return;
            }
            state.auth = AuthFlowState::AwaitingEmail;
        }
        self.emit(UiEvent::ShowEmailStep);
        self.emit(UiEvent::ClearAuthStatus);
    }

    /// Sign out
    ///
    /// The server call is best-effort: its failure is logged and local cleanup
    /// always runs. Afterwards the session, conversation, statistics, login
    /// flow, and last upload are all empty.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            log::warn!("Logout request failed, clearing local session anyway: {e}");
        }

        {
            let mut state = self.state.lock();
            self.epoch.fetch_add(1, Ordering::AcqRel);
            state.session.clear();
            state.conversation.clear();
            state.auth = AuthFlowState::AwaitingEmail;
            state.last_upload = None;
        }
        log::info!("Signed out");

        self.emit(UiEvent::UserChanged(None));
        self.emit(UiEvent::ConversationCleared);
        self.emit(UiEvent::StatisticsChanged(ChatStatistics::default()));
        self.emit(UiEvent::ShowEmailStep);
        self.emit(UiEvent::ClearAuthStatus);
        self.emit(UiEvent::ShowAuthView);
    }

    /// Resume an existing server session, if the credential still carries one
    ///
    /// Returns whether the session is authenticated. Safe to call repeatedly;
    /// a failure empties the session, resets the login flow, and shows the login view.
    pub async fn restore_session(&self) -> bool {
        match self.api.current_user().await {
            Ok(user) => {
                {
                    let mut state = self.state.lock();
                    state.session = Session {
                        authenticated: true,
                        user: Some(user.clone()),
                    };
                }
                log::info!("Resumed session for {}", user.name);
                self.emit(UiEvent::UserChanged(Some(user)));
                self.emit(UiEvent::ShowMainView);
                true
            }
            Err(e) => {
                log::debug!("No session to resume: {e}");
                let had_session = {
                    let mut state = self.state.lock();
                    let had_session = !state.session.is_empty();
                    state.session.clear();
                    state.auth = AuthFlowState::AwaitingEmail;
                    had_session
                };
                if had_session {
                    self.emit(UiEvent::UserChanged(None));
                }
                self.emit(UiEvent::ShowEmailStep);
                self.emit(UiEvent::ShowAuthView);
                false
            }
        }
    }

    /// Follow-up identity fetch after a successful verify
    ///
    /// Dropped if a logout happened since `epoch`.
    async fn refresh_user(&self, epoch: u64) {
        match self.api.current_user().await {
            Ok(user) => {
                {
                    let mut state = self.state.lock();
                    if self.current_epoch() != epoch {
                        log::debug!("Dropping user info that arrived after sign-out");
                        return;
                    }
                    state.session.user = Some(user.clone());
                }
                self.emit(UiEvent::UserChanged(Some(user)));
            }
            Err(e) => log::warn!("Fetching user info after login failed: {e}"),
        }
    }
}

fn signed_out_during_login() -> AssistantError {
    log::debug!("Dropping login result that arrived after sign-out");
    AssistantError::invalid_state("signed out while the login was in progress")
}
