use crate::api::models::{
    AnomalyReport, AuthReply, Comparison, GrowthReport, NightlightsData, RegionFolder,
};
use crate::api::ApiError;
use crate::app::analysis::GrowthKey;
use crate::app::compare::CompareKey;
use crate::app::dashboard::InsightsKey;
use crate::app::login::{LoginEvent, LoginStep};
use crate::app::state::App;
use crate::domain::{Page, YearRange};
use crate::explorer::session::auth_error_message;
use crate::explorer::{DataRequest, Insight, Ticket};
use std::fmt;
use tracing::{debug, info, warn};

/// A finished backend call, tagged with the ticket it was issued under.
#[derive(Debug)]
pub enum ApiEvent {
    Session(Result<AuthReply, ApiError>),
    OtpSent(Result<AuthReply, ApiError>),
    OtpVerified(Result<AuthReply, ApiError>),
    LoggedOut(Result<AuthReply, ApiError>),
    AvailableYears(Result<Vec<i32>, ApiError>),
    AvailableRegions(Result<Vec<RegionFolder>, ApiError>),
    Nightlights(Ticket<DataRequest>, Result<NightlightsData, ApiError>),
    Insights(Ticket<InsightsKey>, Vec<Insight>),
    Growth(Ticket<GrowthKey>, Result<GrowthReport, ApiError>),
    Anomalies(Ticket<String>, Result<AnomalyReport, ApiError>),
    Comparison(Ticket<CompareKey>, Result<Comparison, ApiError>),
}

impl fmt::Display for ApiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(_) => write!(f, "Session"),
            Self::OtpSent(_) => write!(f, "OtpSent"),
            Self::OtpVerified(_) => write!(f, "OtpVerified"),
            Self::LoggedOut(_) => write!(f, "LoggedOut"),
            Self::AvailableYears(_) => write!(f, "AvailableYears"),
            Self::AvailableRegions(_) => write!(f, "AvailableRegions"),
            Self::Nightlights(ticket, _) => write!(f, "Nightlights(#{})", ticket.id),
            Self::Insights(ticket, _) => write!(f, "Insights(#{})", ticket.id),
            Self::Growth(ticket, _) => write!(f, "Growth(#{})", ticket.id),
            Self::Anomalies(ticket, _) => write!(f, "Anomalies(#{})", ticket.id),
            Self::Comparison(ticket, _) => write!(f, "Comparison(#{})", ticket.id),
        }
    }
}

impl App {
    /// Fold one finished call into the UI state. Returns false when the event
    /// was stale or no longer relevant.
    pub fn apply(&mut self, event: ApiEvent) -> bool {
        debug!(%event, "applying backend event");
        match event {
            ApiEvent::Session(outcome) => {
                if !self.auth.apply_session_check(outcome) {
                    return false;
                }
                if let Some(email) = self.auth.email() {
                    info!(email, "existing session found");
                    if self.page == Page::Login {
                        if let Some(target) = self.pending_page.take() {
                            self.navigate(target);
                        }
                    }
                }
                self.guard_protected_page();
                true
            }
            ApiEvent::OtpSent(outcome) => {
                let event = match outcome {
                    Ok(reply) => LoginEvent::OtpSent(
                        reply
                            .message
                            .unwrap_or_else(|| "OTP sent to your email".to_string()),
                    ),
                    Err(e) => LoginEvent::OtpFailed(auth_error_message(&e)),
                };
                self.process_login_event(&event)
            }
            ApiEvent::OtpVerified(outcome) => self.apply_verification(outcome),
            ApiEvent::LoggedOut(outcome) => {
                if let Err(e) = outcome {
                    warn!(error = %e, "logout request failed, local session already cleared");
                }
                true
            }
            ApiEvent::AvailableYears(outcome) => {
                match outcome.map(YearRange::from_available) {
                    Ok(Some(range)) => self.set_year_range(range),
                    Ok(None) => info!("backend reported no years, keeping fallback range"),
                    Err(e) => warn!(error = %e, "could not load available years"),
                }
                true
            }
            ApiEvent::AvailableRegions(outcome) => {
                match outcome {
                    Ok(regions) => self.regions = regions,
                    Err(e) => warn!(error = %e, "could not load available regions"),
                }
                true
            }
            ApiEvent::Nightlights(ticket, outcome) => {
                self.dashboard.apply_nightlights(&ticket, outcome)
            }
            ApiEvent::Insights(ticket, insights) => {
                self.dashboard.insights.complete(&ticket, Ok(insights))
            }
            ApiEvent::Growth(ticket, outcome) => self.analysis.growth.complete(&ticket, outcome),
            ApiEvent::Anomalies(ticket, outcome) => {
                self.analysis.anomalies.complete(&ticket, outcome)
            }
            ApiEvent::Comparison(ticket, outcome) => {
                self.compare.comparison.complete(&ticket, outcome)
            }
        }
    }

    fn apply_verification(&mut self, outcome: Result<AuthReply, ApiError>) -> bool {
        if self.login.step() != LoginStep::Verifying {
            debug!("verification reply arrived after the form moved on");
            return false;
        }

        let event = match self.auth.apply_verification(outcome) {
            Ok(message) => LoginEvent::Verified(message),
            Err(message) => LoginEvent::VerifyFailed(message),
        };
        if !self.process_login_event(&event) {
            return false;
        }

        if self.auth.is_authenticated() {
            let target = self.pending_page.take().unwrap_or(Page::Home);
            self.navigate(target);
        }
        true
    }

    pub(crate) fn process_login_event(&mut self, event: &LoginEvent) -> bool {
        match self.login.process_event(event) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "ignoring login event");
                false
            }
        }
    }
}
