//! Reservation API client
//!
//! One typed method per endpoint. The bearer token is read from the
//! session for every call, so a login or logout takes effect immediately.

use serde::de::IgnoredAny;
use shared::{
    Availability, AvailabilityQuery, Created, DiningTable, DiningTableCreate, LoginRequest,
    LoginResponse, RegisterRequest, Reservation, ReservationCreate, Restaurant, RestaurantCreate,
};

use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::SessionManager;
use crate::{ClientConfig, ClientResult};

/// Percent-encode one user supplied path segment
fn seg(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Typed client for the reservation API
#[derive(Debug)]
pub struct BookingApi<H = NetworkHttpClient> {
    http: H,
    session: SessionManager,
}

impl BookingApi<NetworkHttpClient> {
    /// Build a network client from configuration
    pub fn connect(config: &ClientConfig, session: SessionManager) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?, session))
    }
}

impl<H: HttpClient> BookingApi<H> {
    pub fn new(http: H, session: SessionManager) -> Self {
        Self { http, session }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    // ========== Auth API ==========

    /// Create an account. The returned user is not needed by callers.
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        let _: IgnoredAny = self.http.post("/auth/register", req, None).await?;
        Ok(())
    }

    /// Exchange credentials for a token. Does not touch the session.
    pub async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse> {
        self.http.post("/auth/login", req, None).await
    }

    // ========== Restaurant API ==========

    pub async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let token = self.session.token();
        let list: Option<Vec<Restaurant>> =
            self.http.get("/restaurants", token.as_deref()).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn get_restaurant(&self, id: &str) -> ClientResult<Restaurant> {
        let token = self.session.token();
        self.http
            .get(&format!("/restaurants/{}", seg(id)), token.as_deref())
            .await
    }

    pub async fn create_restaurant(&self, req: &RestaurantCreate) -> ClientResult<Created> {
        let token = self.session.token();
        self.http.post("/restaurants", req, token.as_deref()).await
    }

    pub async fn delete_restaurant(&self, id: &str) -> ClientResult<()> {
        let token = self.session.token();
        let _: IgnoredAny = self
            .http
            .delete(&format!("/restaurants/{}", seg(id)), token.as_deref())
            .await?;
        Ok(())
    }

    // ========== Table API ==========

    pub async fn list_tables(&self, restaurant_id: &str) -> ClientResult<Vec<DiningTable>> {
        let token = self.session.token();
        let list: Option<Vec<DiningTable>> = self
            .http
            .get(
                &format!("/restaurants/{}/tables", seg(restaurant_id)),
                token.as_deref(),
            )
            .await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn create_table(
        &self,
        restaurant_id: &str,
        req: &DiningTableCreate,
    ) -> ClientResult<Created> {
        let token = self.session.token();
        self.http
            .post(
                &format!("/restaurants/{}/tables", seg(restaurant_id)),
                req,
                token.as_deref(),
            )
            .await
    }

    /// Tables that can seat the party for the whole interval, smallest first
    pub async fn check_availability(
        &self,
        restaurant_id: &str,
        query: &AvailabilityQuery,
    ) -> ClientResult<Vec<Availability>> {
        let token = self.session.token();
        let list: Option<Vec<Availability>> = self
            .http
            .post(
                &format!("/restaurants/{}/availability", seg(restaurant_id)),
                query,
                token.as_deref(),
            )
            .await?;
        Ok(list.unwrap_or_default())
    }

    // ========== Reservation API ==========

    pub async fn create_reservation(
        &self,
        restaurant_id: &str,
        req: &ReservationCreate,
    ) -> ClientResult<Created> {
        let token = self.session.token();
        self.http
            .post(
                &format!("/restaurants/{}/reservations", seg(restaurant_id)),
                req,
                token.as_deref(),
            )
            .await
    }

    /// Reservations of the logged-in user. The server identifies the user by token.
    pub async fn my_reservations(&self) -> ClientResult<Vec<Reservation>> {
        let token = self.session.token();
        let list: Option<Vec<Reservation>> =
            self.http.get("/me/reservations", token.as_deref()).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn cancel_reservation(&self, id: &str) -> ClientResult<()> {
        let token = self.session.token();
        let _: IgnoredAny = self
            .http
            .delete(&format!("/reservations/{}", seg(id)), token.as_deref())
            .await?;
        Ok(())
    }

    // ========== Misc ==========

    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        self.http.health().await
    }
}
