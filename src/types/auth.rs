//! Two-step login state

/// Where the email + one-time-code flow currently stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthFlowState {
    /// Waiting for the user to enter an email
    #[default]
    AwaitingEmail,
    /// A code was sent to `email`; waiting for the user to enter it
    AwaitingCode {
        /// Address the code was sent to
        email: String,
    },
}

impl AuthFlowState {
    /// Email the pending code belongs to, if any
    #[must_use]
    pub fn pending_email(&self) -> Option<&str> {
        match self {
            Self::AwaitingEmail => None,
            Self::AwaitingCode { email } => Some(email),
        }
    }
}
