//! Stateful views
//!
//! Each view owns the state of one screen area: its tab, the last loaded
//! data and a status region. Operations never return errors; failures land
//! in the view's status region and the user retries by hand.

mod auth;
mod reservations;
mod restaurants;
mod tables;

pub use auth::{AuthTab, AuthView};
pub use reservations::{AvailabilityForm, ReservationForm, ReservationTab, ReservationView};
pub use restaurants::{RestaurantTab, RestaurantView};
pub use tables::{TableForm, TableView};

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::api::BookingApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::{AuthSession, SessionManager};
use crate::view::{Node, StatusRegion, user_badge};

/// Interactive yes/no question asked before destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes without asking (e.g. `--yes` on the command line)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login / register forms
    Anonymous,
    /// Restaurant, table and reservation sections
    Authenticated,
}

/// All views of the client wired to one API and one session
pub struct App<H: HttpClient = NetworkHttpClient> {
    api: Arc<BookingApi<H>>,
    session: SessionManager,
    session_events: watch::Receiver<Option<AuthSession>>,
    screen: Screen,
    global: StatusRegion,
    pub auth: AuthView<H>,
    pub restaurants: RestaurantView<H>,
    pub tables: TableView<H>,
    pub reservations: ReservationView<H>,
}

impl<H: HttpClient> App<H> {
    pub fn new(api: BookingApi<H>) -> Self {
        let api = Arc::new(api);
        let session = api.session().clone();
        let session_events = session.subscribe();
        let screen = if session.is_authenticated() {
            Screen::Authenticated
        } else {
            Screen::Anonymous
        };

        Self {
            session,
            session_events,
            screen,
            global: StatusRegion::default(),
            auth: AuthView::new(api.clone()),
            restaurants: RestaurantView::new(api.clone()),
            tables: TableView::new(api.clone()),
            reservations: ReservationView::new(api.clone()),
            api,
        }
    }

    /// Initial load: a restored session goes straight to the main screen
    pub async fn start(&mut self) {
        if self.screen == Screen::Authenticated {
            self.restaurants.list().await;
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Signed-in user badge, if any
    pub fn header(&self) -> Option<Node> {
        self.session.user().map(|u| user_badge(&u))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let ok = self.auth.login(email, password).await;
        self.sync_session().await;
        ok
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> bool {
        self.auth.register(name, email, password).await
    }

    pub async fn logout(&mut self) {
        self.auth.logout();
        self.sync_session().await;
    }

    /// React to sign-in / sign-out published by the session manager
    pub async fn sync_session(&mut self) {
        if !self.session_events.has_changed().unwrap_or(false) {
            return;
        }
        let authenticated = self.session_events.borrow_and_update().is_some();

        if authenticated {
            self.screen = Screen::Authenticated;
            self.restaurants.list().await;
        } else {
            self.screen = Screen::Anonymous;
            self.restaurants.reset();
            self.tables.reset();
            self.reservations.reset();
        }
    }

    /// Ping the server origin; the outcome lands in the global status region
    pub async fn health(&mut self) -> bool {
        self.global.clear();
        match self.api.health().await {
            Ok(_) => {
                self.global.success("ok");
                true
            }
            Err(e) => {
                self.global.failure("Health check failed", &e);
                false
            }
        }
    }

    /// Last-resort handler for errors that escaped every view
    pub fn report_unhandled(&mut self, err: &dyn fmt::Display) {
        tracing::error!("Unhandled error: {}", err);
        self.global.error(format!("An error occurred: {}", err));
    }

    pub fn global_status(&self) -> &StatusRegion {
        &self.global
    }
}
