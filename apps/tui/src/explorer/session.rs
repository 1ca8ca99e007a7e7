use crate::api::models::{AuthReply, User};
use crate::api::ApiError;
use tracing::{debug, info, warn};

/// Who is signed in. Owned by the app, created at startup and cleared on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<User>,
    checked: bool,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// False until the startup session check has come back.
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.email.as_str())
    }

    /// Apply the startup session check. Any failure means "not signed in".
    ///
    /// Only the first answer counts: a reply that lands after an OTP login
    /// already settled the context is dropped and `false` is returned.
    pub fn apply_session_check(&mut self, outcome: Result<AuthReply, ApiError>) -> bool {
        if self.checked {
            debug!("session check reply arrived after the context was settled");
            return false;
        }
        self.checked = true;
        self.user = match outcome {
            Ok(reply) if reply.authenticated == Some(true) => reply.user,
            Ok(_) => None,
            Err(e) => {
                if e.is_network() {
                    warn!(error = %e, "session check failed, backend may not be running");
                } else {
                    warn!(error = %e, "session check failed");
                }
                None
            }
        };
        true
    }

    /// Apply an OTP verification reply, returning the message to show.
    pub fn apply_verification(
        &mut self,
        outcome: Result<AuthReply, ApiError>,
    ) -> Result<String, String> {
        match outcome {
            Ok(reply) => match reply.user {
                Some(user) => {
                    info!(email = %user.email, "signed in");
                    self.user = Some(user);
                    self.checked = true;
                    Ok(reply
                        .message
                        .unwrap_or_else(|| "Login successful".to_string()))
                }
                None => Err(reply
                    .message
                    .unwrap_or_else(|| "Verification failed".to_string())),
            },
            Err(e) => Err(auth_error_message(&e)),
        }
    }

    pub fn clear(&mut self) {
        self.user = None;
    }
}

/// Message for a failed auth call, phrased for the login form.
pub fn auth_error_message(err: &ApiError) -> String {
    match err {
        ApiError::NetworkUnreachable(_) => {
            "Network error. Please check if the backend server is running.".to_string()
        }
        ApiError::Server { message, .. } | ApiError::Malformed(message) => message.clone(),
        ApiError::Timeout(_) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(authenticated: bool, email: Option<&str>) -> AuthReply {
        AuthReply {
            success: true,
            message: None,
            user: email.map(|email| User {
                email: email.to_string(),
            }),
            authenticated: Some(authenticated),
        }
    }

    #[test]
    fn authenticated_session_sets_user() {
        let mut auth = AuthContext::new();
        auth.apply_session_check(Ok(reply(true, Some("a@b.io"))));
        assert!(auth.is_checked());
        assert_eq!(auth.email(), Some("a@b.io"));
    }

    #[test]
    fn failed_session_check_means_signed_out() {
        let mut auth = AuthContext::new();
        assert!(auth.apply_session_check(Err(ApiError::NetworkUnreachable(
            "refused".to_string()
        ))));
        assert!(auth.is_checked());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn late_session_check_keeps_verified_user() {
        let mut auth = AuthContext::new();
        auth.apply_verification(Ok(reply(true, Some("a@b.io"))))
            .unwrap();
        assert!(!auth.apply_session_check(Ok(reply(false, None))));
        assert_eq!(auth.email(), Some("a@b.io"));
    }

    #[test]
    fn unauthenticated_reply_ignores_user() {
        let mut auth = AuthContext::new();
        auth.apply_session_check(Ok(reply(false, Some("a@b.io"))));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn verification_error_is_phrased_for_the_form() {
        let mut auth = AuthContext::new();
        let message = auth
            .apply_verification(Err(ApiError::Server {
                status: 400,
                message: "Invalid OTP".to_string(),
            }))
            .unwrap_err();
        assert_eq!(message, "Invalid OTP");
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn verification_success_signs_in() {
        let mut auth = AuthContext::new();
        let message = auth
            .apply_verification(Ok(reply(true, Some("a@b.io"))))
            .unwrap();
        assert_eq!(message, "Login successful");
        assert!(auth.is_authenticated());
    }
}
