use crate::api::ExplorerBackend;
use crate::app::analysis::GrowthKey;
use crate::app::compare::CompareKey;
use crate::app::dashboard::InsightsKey;
use crate::app::events::ApiEvent;
use crate::explorer::{load_insights, DataRequest, Ticket};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Launches backend calls off the UI task. Each call reports back as one
/// [`ApiEvent`] on the app's channel.
#[derive(Clone)]
pub struct AppActions {
    backend: Arc<dyn ExplorerBackend>,
    events: UnboundedSender<ApiEvent>,
    max_insights: u32,
}

impl AppActions {
    pub fn new(
        backend: Arc<dyn ExplorerBackend>,
        events: UnboundedSender<ApiEvent>,
        max_insights: u32,
    ) -> Self {
        Self {
            backend,
            events,
            max_insights,
        }
    }

    fn spawn<F, Fut>(&self, call: F)
    where
        F: FnOnce(Arc<dyn ExplorerBackend>) -> Fut,
        Fut: Future<Output = ApiEvent> + Send + 'static,
    {
        let events = self.events.clone();
        let pending = call(Arc::clone(&self.backend));
        tokio::spawn(async move {
            let event = pending.await;
            if events.send(event).is_err() {
                debug!("event loop closed before a response arrived");
            }
        });
    }

    pub fn check_session(&self) {
        self.spawn(|backend| async move { ApiEvent::Session(backend.check_session().await) });
    }

    pub fn send_otp(&self, email: String) {
        self.spawn(|backend| async move { ApiEvent::OtpSent(backend.send_otp(&email).await) });
    }

    pub fn verify_otp(&self, email: String, otp: String) {
        self.spawn(|backend| async move {
            ApiEvent::OtpVerified(backend.verify_otp(&email, &otp).await)
        });
    }

    pub fn logout(&self) {
        self.spawn(|backend| async move { ApiEvent::LoggedOut(backend.logout().await) });
    }

    pub fn available_years(&self) {
        self.spawn(|backend| async move {
            ApiEvent::AvailableYears(backend.available_years().await)
        });
    }

    pub fn available_regions(&self) {
        self.spawn(|backend| async move {
            ApiEvent::AvailableRegions(backend.available_regions().await)
        });
    }

    pub fn nightlights(&self, ticket: Ticket<DataRequest>) {
        let sample_rate = ticket
            .key
            .param("sample_rate")
            .and_then(|rate| rate.parse().ok())
            .unwrap_or(10);
        self.spawn(move |backend| async move {
            let outcome = backend.nightlights(ticket.key.year, sample_rate).await;
            ApiEvent::Nightlights(ticket, outcome)
        });
    }

    pub fn insights(&self, ticket: Ticket<InsightsKey>) {
        let max_results = self.max_insights;
        self.spawn(move |backend| async move {
            let insights =
                load_insights(backend.as_ref(), &ticket.key.region, ticket.key.year, max_results)
                    .await;
            ApiEvent::Insights(ticket, insights)
        });
    }

    pub fn growth(&self, ticket: Ticket<GrowthKey>) {
        self.spawn(move |backend| async move {
            let outcome = backend
                .growth(&ticket.key.region, ticket.key.start_year, ticket.key.end_year)
                .await;
            ApiEvent::Growth(ticket, outcome)
        });
    }

    pub fn anomalies(&self, ticket: Ticket<String>) {
        self.spawn(move |backend| async move {
            let outcome = backend.anomalies(&ticket.key).await;
            ApiEvent::Anomalies(ticket, outcome)
        });
    }

    pub fn compare(&self, ticket: Ticket<CompareKey>) {
        self.spawn(move |backend| async move {
            let outcome = backend
                .compare(&ticket.key.region, ticket.key.year1, ticket.key.year2)
                .await;
            ApiEvent::Comparison(ticket, outcome)
        });
    }
}
