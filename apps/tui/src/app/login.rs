use std::convert::TryFrom;
use std::fmt;

/// Steps of the passwordless sign-in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoginStep {
    EnteringEmail,
    SendingOtp,
    EnteringOtp,
    ResendingOtp,
    Verifying,
    SignedIn,
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnteringEmail => write!(f, "EnteringEmail"),
            Self::SendingOtp => write!(f, "SendingOtp"),
            Self::EnteringOtp => write!(f, "EnteringOtp"),
            Self::ResendingOtp => write!(f, "ResendingOtp"),
            Self::Verifying => write!(f, "Verifying"),
            Self::SignedIn => write!(f, "SignedIn"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum LoginEvent {
    SubmitEmail,
    OtpSent(String),
    OtpFailed(String),
    Resend,
    SubmitOtp,
    Verified(String),
    VerifyFailed(String),
    Back,
    Reset,
}

impl fmt::Display for LoginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubmitEmail => write!(f, "SubmitEmail"),
            Self::OtpSent(msg) => write!(f, "OtpSent({msg})"),
            Self::OtpFailed(msg) => write!(f, "OtpFailed({msg})"),
            Self::Resend => write!(f, "Resend"),
            Self::SubmitOtp => write!(f, "SubmitOtp"),
            Self::Verified(msg) => write!(f, "Verified({msg})"),
            Self::VerifyFailed(msg) => write!(f, "VerifyFailed({msg})"),
            Self::Back => write!(f, "Back"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
pub struct StateTransitionError {
    pub from: LoginStep,
    pub event: LoginEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMessage {
    Success(String),
    Error(String),
}

/// Form fields plus the step machine driving them.
#[derive(Debug, Clone)]
pub struct LoginForm {
    step: LoginStep,
    pub email: String,
    pub otp: String,
    pub message: Option<LoginMessage>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            step: LoginStep::EnteringEmail,
            email: String::new(),
            otp: String::new(),
            message: None,
        }
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn step(&self) -> LoginStep {
        self.step
    }

    pub const fn is_pending(&self) -> bool {
        matches!(
            self.step,
            LoginStep::SendingOtp | LoginStep::ResendingOtp | LoginStep::Verifying
        )
    }

    /// Field currently receiving keystrokes, if any.
    pub fn active_field(&mut self) -> Option<&mut String> {
        match self.step {
            LoginStep::EnteringEmail => Some(&mut self.email),
            LoginStep::EnteringOtp => Some(&mut self.otp),
            _ => None,
        }
    }

    pub fn process_event(&mut self, event: &LoginEvent) -> Result<LoginStep, StateTransitionError> {
        let next = NextStep::try_from((self.step, event, &mut *self))?;
        self.step = next.0;
        Ok(self.step)
    }
}

struct NextStep(LoginStep);

impl LoginStep {
    const fn next_step(self) -> NextStep {
        NextStep(self)
    }
}

impl TryFrom<(LoginStep, &LoginEvent, &mut LoginForm)> for NextStep {
    type Error = StateTransitionError;

    fn try_from(value: (LoginStep, &LoginEvent, &mut LoginForm)) -> Result<Self, Self::Error> {
        let (current, event, form) = value;

        match (current, event) {
            (LoginStep::EnteringEmail, LoginEvent::SubmitEmail) => {
                if let Err(reason) = validate_email(&form.email) {
                    form.message = Some(LoginMessage::Error(reason));
                    return Ok(current.next_step());
                }
                form.email = form.email.trim().to_string();
                form.message = None;
                Ok(LoginStep::SendingOtp.next_step())
            }
            (LoginStep::SendingOtp, LoginEvent::OtpSent(message)) => {
                form.otp.clear();
                form.message = Some(LoginMessage::Success(message.clone()));
                Ok(LoginStep::EnteringOtp.next_step())
            }
            (LoginStep::SendingOtp, LoginEvent::OtpFailed(message)) => {
                form.message = Some(LoginMessage::Error(message.clone()));
                Ok(LoginStep::EnteringEmail.next_step())
            }
            (LoginStep::EnteringOtp, LoginEvent::Resend) => {
                form.otp.clear();
                form.message = None;
                Ok(LoginStep::ResendingOtp.next_step())
            }
            (LoginStep::ResendingOtp, LoginEvent::OtpSent(_)) => {
                form.message = Some(LoginMessage::Success(
                    "New OTP sent to your email!".to_string(),
                ));
                Ok(LoginStep::EnteringOtp.next_step())
            }
            (LoginStep::ResendingOtp, LoginEvent::OtpFailed(message))
            | (LoginStep::Verifying, LoginEvent::VerifyFailed(message)) => {
                form.message = Some(LoginMessage::Error(message.clone()));
                Ok(LoginStep::EnteringOtp.next_step())
            }
            (LoginStep::EnteringOtp, LoginEvent::SubmitOtp) => {
                if let Err(reason) = validate_otp(&form.otp) {
                    form.message = Some(LoginMessage::Error(reason));
                    return Ok(current.next_step());
                }
                form.message = None;
                Ok(LoginStep::Verifying.next_step())
            }
            (LoginStep::Verifying, LoginEvent::Verified(message)) => {
                form.otp.clear();
                form.message = Some(LoginMessage::Success(message.clone()));
                Ok(LoginStep::SignedIn.next_step())
            }
            (LoginStep::EnteringOtp, LoginEvent::Back) => {
                form.otp.clear();
                form.message = None;
                Ok(LoginStep::EnteringEmail.next_step())
            }
            (_, LoginEvent::Reset) => {
                *form = LoginForm::default();
                Ok(LoginStep::EnteringEmail.next_step())
            }
            _ => Err(StateTransitionError {
                from: current,
                event: event.clone(),
            }),
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !email.contains(char::is_whitespace)
    });

    if valid {
        Ok(())
    } else {
        Err("Please enter a valid email address".to_string())
    }
}

pub fn validate_otp(otp: &str) -> Result<(), String> {
    if otp.len() == 6 && otp.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("OTP must be 6 digits".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_email(email: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn invalid_email_stays_on_email_step() {
        let mut form = form_with_email("not-an-email");
        let step = form.process_event(&LoginEvent::SubmitEmail).unwrap();
        assert_eq!(step, LoginStep::EnteringEmail);
        assert!(matches!(form.message, Some(LoginMessage::Error(_))));
    }

    #[test]
    fn happy_path_reaches_signed_in() {
        let mut form = form_with_email("  ana@example.org ");
        form.process_event(&LoginEvent::SubmitEmail).unwrap();
        assert_eq!(form.step(), LoginStep::SendingOtp);
        assert_eq!(form.email, "ana@example.org");

        form.process_event(&LoginEvent::OtpSent("OTP sent".to_string()))
            .unwrap();
        assert_eq!(form.step(), LoginStep::EnteringOtp);

        form.otp = "123456".to_string();
        form.process_event(&LoginEvent::SubmitOtp).unwrap();
        assert_eq!(form.step(), LoginStep::Verifying);

        form.process_event(&LoginEvent::Verified("Login successful".to_string()))
            .unwrap();
        assert_eq!(form.step(), LoginStep::SignedIn);
    }

    #[test]
    fn short_otp_is_rejected_locally() {
        let mut form = form_with_email("ana@example.org");
        form.process_event(&LoginEvent::SubmitEmail).unwrap();
        form.process_event(&LoginEvent::OtpSent(String::new())).unwrap();
        form.otp = "12a4".to_string();
        assert_eq!(
            form.process_event(&LoginEvent::SubmitOtp).unwrap(),
            LoginStep::EnteringOtp
        );
        assert_eq!(
            form.message,
            Some(LoginMessage::Error("OTP must be 6 digits".to_string()))
        );
    }

    #[test]
    fn resend_returns_to_otp_entry() {
        let mut form = form_with_email("ana@example.org");
        form.process_event(&LoginEvent::SubmitEmail).unwrap();
        form.process_event(&LoginEvent::OtpSent(String::new())).unwrap();
        form.otp = "99".to_string();

        form.process_event(&LoginEvent::Resend).unwrap();
        assert!(form.otp.is_empty());
        assert!(form.is_pending());

        form.process_event(&LoginEvent::OtpSent(String::new())).unwrap();
        assert_eq!(form.step(), LoginStep::EnteringOtp);
        assert_eq!(
            form.message,
            Some(LoginMessage::Success("New OTP sent to your email!".to_string()))
        );
    }

    #[test]
    fn late_reply_after_going_back_is_rejected() {
        let mut form = form_with_email("ana@example.org");
        form.process_event(&LoginEvent::SubmitEmail).unwrap();
        form.process_event(&LoginEvent::OtpSent(String::new())).unwrap();
        form.process_event(&LoginEvent::Back).unwrap();

        let err = form
            .process_event(&LoginEvent::Verified("late".to_string()))
            .unwrap_err();
        assert_eq!(err.from, LoginStep::EnteringEmail);
        assert_eq!(form.step(), LoginStep::EnteringEmail);
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@b.io").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.io").is_err());
        assert!(validate_email("@c.io").is_err());
    }
}
