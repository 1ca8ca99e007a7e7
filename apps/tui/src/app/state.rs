use crate::api::models::RegionFolder;
use crate::api::ExplorerBackend;
use crate::app::actions::AppActions;
use crate::app::analysis::AnalysisState;
use crate::app::compare::CompareState;
use crate::app::dashboard::DashboardState;
use crate::app::events::ApiEvent;
use crate::app::login::{LoginEvent, LoginForm, LoginStep};
use crate::config::AppConfig;
use crate::domain::{Page, YearRange};
use crate::explorer::{AuthContext, Gazetteer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

pub struct App {
    pub running: bool,
    pub page: Page,
    /// Protected page the user asked for before being sent to log in.
    pub pending_page: Option<Page>,
    pub status_message: String,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber: ThrobberState,
    pub config: AppConfig,
    pub auth: AuthContext,
    pub gazetteer: Gazetteer,
    pub years: YearRange,
    pub regions: Vec<RegionFolder>,
    pub login: LoginForm,
    pub dashboard: DashboardState,
    pub analysis: AnalysisState,
    pub compare: CompareState,
    pub actions: AppActions,
    inbox: UnboundedReceiver<ApiEvent>,
}

impl App {
    pub fn new(config: AppConfig, backend: Arc<dyn ExplorerBackend>) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        let years = YearRange::fallback(config.default_year);
        let year = years.clamp(config.default_year);

        Self {
            running: true,
            page: Page::Home,
            pending_page: None,
            status_message: String::new(),
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber: ThrobberState::default(),
            auth: AuthContext::new(),
            gazetteer: Gazetteer::default(),
            regions: Vec::new(),
            login: LoginForm::new(),
            dashboard: DashboardState::new(year, config.sample_rate),
            analysis: AnalysisState::new(years.first(), year),
            compare: CompareState::new(years.first(), year),
            actions: AppActions::new(backend, events, config.max_insights),
            years,
            config,
            inbox,
        }
    }

    /// Kick off the startup calls: session check and the backend's year/region lists.
    pub fn start(&self) {
        self.actions.check_session();
        self.actions.available_years();
        self.actions.available_regions();
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.tick(delta);
    }

    pub fn tick(&mut self, delta: Duration) {
        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 0.5;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
        self.dashboard.map.tick(delta);
        self.throbber.calc_next();
    }

    /// Apply every event already waiting. Never blocks.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.inbox.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next backend event.
    pub async fn next_event(&mut self) -> Option<ApiEvent> {
        self.inbox.recv().await
    }

    pub fn navigate(&mut self, page: Page) {
        if page.is_protected() && !self.auth.is_authenticated() {
            info!(requested = page.as_str(), "redirecting to login");
            self.pending_page = Some(page);
            self.status_message = format!("Sign in to open {}", page.label());
            self.page = Page::Login;
            return;
        }

        self.page = page;
        self.status_message.clear();
        match page {
            Page::Dashboard => self.refresh_dashboard(),
            Page::Analysis if self.analysis.growth.key().is_none() => self.run_analysis(),
            Page::Compare if self.compare.comparison.key().is_none() => self.run_compare(),
            _ => {}
        }
    }

    /// Send a signed-out user away from a protected page.
    pub fn guard_protected_page(&mut self) {
        if self.page.is_protected() && !self.auth.is_authenticated() {
            self.navigate(self.page);
        }
    }

    /// Move along the navbar. Login is not on it, so from there we start at Home.
    pub fn cycle_page(&mut self, forward: bool) {
        let len = Page::NAV.len();
        let index = self.page.nav_index().unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if let Some(page) = Page::from_index(next) {
            self.navigate(page);
        }
    }

    /// Clear the local session right away, then tell the backend.
    pub fn logout(&mut self) {
        if !self.auth.is_authenticated() {
            return;
        }
        self.auth.clear();
        self.process_login_event(&LoginEvent::Reset);
        self.pending_page = None;
        self.actions.logout();
        if self.page.is_protected() {
            self.page = Page::Home;
        }
        self.status_message = "Signed out".to_string();
    }

    pub fn set_year_range(&mut self, years: YearRange) {
        info!(first = years.first(), last = years.last(), "year range loaded");
        self.years = years;
        for year in [
            &mut self.analysis.start_year,
            &mut self.analysis.end_year,
            &mut self.compare.year1,
            &mut self.compare.year2,
        ] {
            *year = self.years.clamp(*year);
        }
        let clamped = self.years.clamp(self.dashboard.year);
        if clamped != self.dashboard.year {
            self.set_dashboard_year(clamped);
        }
    }

    pub fn submit_search(&mut self) {
        if self.dashboard.search(&self.gazetteer) {
            self.refresh_dashboard();
            self.reload_insights();
        }
    }

    pub fn clear_search(&mut self) {
        self.dashboard.clear_region();
        self.refresh_dashboard();
    }

    pub fn set_dashboard_year(&mut self, year: i32) {
        let year = self.years.clamp(year);
        if year == self.dashboard.year {
            return;
        }
        self.dashboard.year = year;
        self.refresh_dashboard();
        self.reload_insights();
    }

    pub fn step_dashboard_year(&mut self, steps: i32) {
        let year = self.years.step(self.dashboard.year, steps);
        self.set_dashboard_year(year);
    }

    pub fn change_sample_rate(&mut self, finer: bool) {
        self.dashboard.cycle_sample_rate(finer);
        self.refresh_dashboard();
    }

    pub fn refresh_dashboard(&mut self) {
        if let Some(ticket) = self.dashboard.refresh() {
            self.actions.nightlights(ticket);
        }
    }

    pub fn reload_insights(&mut self) {
        if let Some(ticket) = self.dashboard.reload_insights() {
            self.actions.insights(ticket);
        }
    }

    pub fn run_analysis(&mut self) {
        match self.analysis.run() {
            Ok((growth, anomalies)) => {
                self.status_message.clear();
                self.actions.growth(growth);
                self.actions.anomalies(anomalies);
            }
            Err(reason) => self.status_message = format!("Error: {reason}"),
        }
    }

    pub fn run_compare(&mut self) {
        match self.compare.run() {
            Ok(ticket) => {
                self.status_message.clear();
                self.actions.compare(ticket);
            }
            Err(reason) => self.status_message = format!("Error: {reason}"),
        }
    }

    /// Enter on the login form: send the code or verify it depending on the step.
    pub fn submit_login(&mut self) {
        match self.login.step() {
            LoginStep::EnteringEmail => {
                if self.process_login_event(&LoginEvent::SubmitEmail)
                    && self.login.step() == LoginStep::SendingOtp
                {
                    self.actions.send_otp(self.login.email.clone());
                }
            }
            LoginStep::EnteringOtp => {
                if self.process_login_event(&LoginEvent::SubmitOtp)
                    && self.login.step() == LoginStep::Verifying
                {
                    self.actions
                        .verify_otp(self.login.email.clone(), self.login.otp.clone());
                }
            }
            _ => {}
        }
    }

    pub fn resend_otp(&mut self) {
        if self.process_login_event(&LoginEvent::Resend) {
            self.actions.send_otp(self.login.email.clone());
        }
    }

    pub fn login_back(&mut self) {
        self.process_login_event(&LoginEvent::Back);
    }

    /// True while any request the current page shows is in flight.
    pub fn is_busy(&self) -> bool {
        match self.page {
            Page::Dashboard => {
                self.dashboard.nightlights.state().is_loading()
                    || self.dashboard.insights.state().is_loading()
            }
            Page::Analysis => {
                self.analysis.growth.state().is_loading()
                    || self.analysis.anomalies.state().is_loading()
            }
            Page::Compare => self.compare.comparison.state().is_loading(),
            Page::Login => self.login.is_pending(),
            Page::Home | Page::About => false,
        }
    }
}
