//! Login, registration and logout

use std::sync::Arc;

use shared::{LoginRequest, RegisterRequest};

use crate::api::BookingApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::AuthSession;
use crate::view::StatusRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Anonymous screen: login and register forms sharing one status region
pub struct AuthView<H: HttpClient = NetworkHttpClient> {
    api: Arc<BookingApi<H>>,
    tab: AuthTab,
    status: StatusRegion,
}

impl<H: HttpClient> AuthView<H> {
    pub fn new(api: Arc<BookingApi<H>>) -> Self {
        Self {
            api,
            tab: AuthTab::default(),
            status: StatusRegion::default(),
        }
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn show_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
    }

    pub fn status(&self) -> &StatusRegion {
        &self.status
    }

    /// Log in and store the session. Nothing is stored on failure.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.status.clear();
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&req).await {
            Ok(resp) => {
                let name = resp.user.name.clone();
                self.api.session().sign_in(AuthSession {
                    token: resp.token,
                    user: resp.user,
                });
                self.status.success(format!("Logged in. Welcome {}", name));
                true
            }
            Err(e) => {
                self.status.failure("Login failed", &e);
                false
            }
        }
    }

    /// Create an account, then show the login form. Does not log in.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> bool {
        self.status.clear();
        let req = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.register(&req).await {
            Ok(()) => {
                self.status
                    .success("Registration successful. Please log in.");
                self.tab = AuthTab::Login;
                true
            }
            Err(e) => {
                self.status.failure("Registration failed", &e);
                false
            }
        }
    }

    /// Drop the session locally. The server is not contacted.
    pub fn logout(&mut self) {
        self.api.session().sign_out();
        self.tab = AuthTab::Login;
        self.status.success("Logged out");
    }
}
