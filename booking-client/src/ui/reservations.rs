//! Reservation section: booking, availability and "my reservations"

use std::sync::Arc;

use chrono::FixedOffset;
use shared::{Availability, AvailabilityQuery, Reservation, ReservationCreate};

use super::Confirm;
use crate::api::BookingApi;
use crate::form::{local_to_utc, non_blank, parse_int, required};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::view::{Node, StatusRegion, availability_list, counted, reservation_list};
use crate::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationTab {
    #[default]
    Create,
    Mine,
}

/// Booking form as typed by the user
///
/// Times are local date-time inputs such as `2024-05-01T19:30`.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub restaurant_id: String,
    /// Blank lets the server choose a table
    pub table_id: String,
    pub start_time: String,
    pub end_time: String,
    pub guests: String,
}

/// Availability query as typed by the user
#[derive(Debug, Clone, Default)]
pub struct AvailabilityForm {
    pub restaurant_id: String,
    pub start_time: String,
    pub end_time: String,
    pub guests: String,
}

pub struct ReservationView<H: HttpClient = NetworkHttpClient> {
    api: Arc<BookingApi<H>>,
    tab: ReservationTab,
    /// `None` converts with the machine's local zone
    offset: Option<FixedOffset>,
    reservations: Option<Vec<Reservation>>,
    availability: Option<Vec<Availability>>,
    status: StatusRegion,
}

impl<H: HttpClient> ReservationView<H> {
    pub fn new(api: Arc<BookingApi<H>>) -> Self {
        Self {
            api,
            tab: ReservationTab::default(),
            offset: None,
            reservations: None,
            availability: None,
            status: StatusRegion::default(),
        }
    }

    /// Interpret form times in a fixed zone instead of the local one
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn tab(&self) -> ReservationTab {
        self.tab
    }

    /// Switch tabs; opening "mine" loads the list
    pub async fn show_tab(&mut self, tab: ReservationTab) {
        self.tab = tab;
        if tab == ReservationTab::Mine {
            self.list_mine().await;
        }
    }

    pub fn status(&self) -> &StatusRegion {
        &self.status
    }

    pub fn render(&self) -> Option<Node> {
        self.reservations.as_deref().map(reservation_list)
    }

    pub fn render_availability(&self) -> Option<Node> {
        self.availability.as_deref().map(availability_list)
    }

    pub(crate) fn reset(&mut self) {
        self.tab = ReservationTab::Create;
        self.reservations = None;
        self.availability = None;
        self.status.clear();
    }

    fn booking_payload(&self, form: &ReservationForm) -> ClientResult<(String, ReservationCreate)> {
        let restaurant_id = required(&form.restaurant_id, "Please enter a restaurant ID")?;
        let payload = ReservationCreate {
            table_id: non_blank(&form.table_id).map(str::to_owned),
            start: local_to_utc(&form.start_time, self.offset, "Start time")?,
            end: local_to_utc(&form.end_time, self.offset, "End time")?,
            guests: parse_int(&form.guests, "Guests")?,
        };
        Ok((restaurant_id.to_string(), payload))
    }

    fn availability_query(&self, form: &AvailabilityForm) -> ClientResult<(String, AvailabilityQuery)> {
        let restaurant_id = required(&form.restaurant_id, "Please enter a restaurant ID")?;
        let query = AvailabilityQuery {
            start: local_to_utc(&form.start_time, self.offset, "Start time")?,
            end: local_to_utc(&form.end_time, self.offset, "End time")?,
            guests: parse_int(&form.guests, "Guests")?,
        };
        Ok((restaurant_id.to_string(), query))
    }

    pub async fn create(&mut self, form: &ReservationForm) -> bool {
        self.status.clear();
        let (restaurant_id, payload) = match self.booking_payload(form) {
            Ok(p) => p,
            Err(e) => {
                self.status.failure("Failed to create reservation", &e);
                return false;
            }
        };

        match self.api.create_reservation(&restaurant_id, &payload).await {
            Ok(created) => {
                tracing::info!(id = %created.id, restaurant = %restaurant_id, "Reservation created");
                self.status
                    .success(format!("Reservation created. ID: {}", created.id));
                true
            }
            Err(e) => {
                self.status.failure("Failed to create reservation", &e);
                false
            }
        }
    }

    pub async fn check_availability(&mut self, form: &AvailabilityForm) -> bool {
        self.status.clear();
        let (restaurant_id, query) = match self.availability_query(form) {
            Ok(q) => q,
            Err(e) => {
                self.status.failure("Failed to check availability", &e);
                return false;
            }
        };

        match self.api.check_availability(&restaurant_id, &query).await {
            Ok(slots) => {
                if !slots.is_empty() {
                    let verb = if slots.len() == 1 { "is" } else { "are" };
                    self.status.success(format!(
                        "{} {} available",
                        counted(slots.len(), "table", "tables"),
                        verb
                    ));
                }
                self.availability = Some(slots);
                true
            }
            Err(e) => {
                self.status.failure("Failed to check availability", &e);
                false
            }
        }
    }

    pub async fn list_mine(&mut self) -> bool {
        self.status.clear();
        match self.api.my_reservations().await {
            Ok(list) => {
                if !list.is_empty() {
                    self.status.success(format!(
                        "Loaded {}",
                        counted(list.len(), "reservation", "reservations")
                    ));
                }
                self.reservations = Some(list);
                true
            }
            Err(e) => {
                self.status.failure("Failed to load reservations", &e);
                false
            }
        }
    }

    /// Cancel after confirmation, then reload the list. Declining sends
    /// nothing and leaves the status region empty.
    pub async fn cancel(&mut self, id: &str, confirm: &dyn Confirm) -> bool {
        self.status.clear();
        if !confirm.confirm("Cancel this reservation?") {
            return false;
        }

        match self.api.cancel_reservation(id).await {
            Ok(()) => {
                tracing::info!(%id, "Reservation cancelled");
                self.status.success("Reservation cancelled");
                match self.api.my_reservations().await {
                    Ok(list) => self.reservations = Some(list),
                    Err(e) => self.status.failure("Failed to load reservations", &e),
                }
                true
            }
            Err(e) => {
                self.status.failure("Failed to cancel reservation", &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHttpClient;
    use crate::session::SessionManager;
    use crate::ui::AssumeYes;
    use serde_json::json;

    fn view(mock: MockHttpClient) -> ReservationView<MockHttpClient> {
        ReservationView::new(Arc::new(BookingApi::new(mock, SessionManager::in_memory())))
            .with_offset(FixedOffset::east_opt(2 * 3600).unwrap())
    }

    fn form(table_id: &str) -> ReservationForm {
        ReservationForm {
            restaurant_id: "r1".into(),
            table_id: table_id.into(),
            start_time: "2024-05-01T19:00".into(),
            end_time: "2024-05-01T21:00".into(),
            guests: "2".into(),
        }
    }

    fn reservation_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id, "restaurantId": "r1", "tableId": "t1", "userId": "u1",
            "startTime": "2024-05-01T17:00:00Z", "endTime": "2024-05-01T19:00:00Z",
            "guests": 2, "status": status, "createdAt": "2024-04-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_blank_table_is_omitted_from_payload() {
        let mock = MockHttpClient::new();
        mock.respond("POST", "/restaurants/r1/reservations", json!({"id": "res1"}));
        let mut view = view(mock);

        assert!(view.create(&form("  ")).await);
        assert_eq!(view.status().message(), Some("Reservation created. ID: res1"));

        let body = view.api.http().calls()[0].body.clone().unwrap();
        let obj = body.as_object().unwrap();
        assert!(!obj.contains_key("tableId"));
        assert_eq!(obj["start"], "2024-05-01T17:00:00Z");
        assert_eq!(obj["end"], "2024-05-01T19:00:00Z");
        assert_eq!(obj["guests"], 2);
    }

    #[tokio::test]
    async fn test_chosen_table_is_sent() {
        let mock = MockHttpClient::new();
        mock.respond("POST", "/restaurants/r1/reservations", json!({"id": "res2"}));
        let mut view = view(mock);

        assert!(view.create(&form("t7")).await);
        let body = view.api.http().calls()[0].body.clone().unwrap();
        assert_eq!(body["tableId"], "t7");
    }

    #[tokio::test]
    async fn test_invalid_time_sends_nothing() {
        let mut view = view(MockHttpClient::new());
        let mut bad = form("");
        bad.end_time = "later".into();

        assert!(!view.create(&bad).await);
        assert!(view.status().message().unwrap().starts_with("End time"));
        assert!(view.api.http().calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_rejection_is_shown() {
        let mock = MockHttpClient::new();
        mock.fail(
            "POST",
            "/restaurants/r1/reservations",
            400,
            "no available table for the requested time",
        );
        let mut view = view(mock);

        assert!(!view.create(&form("")).await);
        assert_eq!(
            view.status().message(),
            Some("Failed to create reservation: no available table for the requested time")
        );
    }

    #[tokio::test]
    async fn test_mine_tab_loads_and_hides_cancel_for_cancelled() {
        let mock = MockHttpClient::new();
        mock.respond(
            "GET",
            "/me/reservations",
            json!([reservation_json("a", "confirmed"), reservation_json("b", "cancelled")]),
        );
        let mut view = view(mock);

        view.show_tab(ReservationTab::Mine).await;
        let node = view.render().unwrap();
        assert_eq!(node.items().len(), 2);
        let targets: Vec<&str> = node.actions().iter().map(|a| a.target()).collect();
        assert_eq!(targets, vec!["a"]);
        assert_eq!(view.status().message(), Some("Loaded 2 reservations"));
    }

    #[tokio::test]
    async fn test_cancel_reloads_list() {
        let mock = MockHttpClient::new();
        mock.respond("DELETE", "/reservations/a", json!({"status": "cancelled"}));
        mock.respond(
            "GET",
            "/me/reservations",
            json!([reservation_json("a", "cancelled")]),
        );
        let mut view = view(mock);

        assert!(view.cancel("a", &AssumeYes).await);
        assert_eq!(view.status().message(), Some("Reservation cancelled"));
        assert!(view.render().unwrap().actions().is_empty());
    }

    #[tokio::test]
    async fn test_declined_cancel_clears_previous_status() {
        struct Decline;
        impl Confirm for Decline {
            fn confirm(&self, _prompt: &str) -> bool {
                false
            }
        }

        let mock = MockHttpClient::new();
        mock.respond("GET", "/me/reservations", json!([reservation_json("a", "confirmed")]));
        let mut view = view(mock);

        assert!(view.list_mine().await);
        assert_eq!(view.status().message(), Some("Loaded 1 reservation"));

        assert!(!view.cancel("a", &Decline).await);
        assert!(view.status().line().is_none());
        assert_eq!(view.api.http().calls().len(), 1);
        assert_eq!(view.render().unwrap().actions().len(), 1);
    }

    #[tokio::test]
    async fn test_availability_lists_free_tables() {
        let mock = MockHttpClient::new();
        mock.respond(
            "POST",
            "/restaurants/r1/availability",
            json!([{"tableId": "t1", "capacity": 2}, {"tableId": "t3", "capacity": 4}]),
        );
        let mut view = view(mock);
        let query = AvailabilityForm {
            restaurant_id: "r1".into(),
            start_time: "2024-05-01T19:00".into(),
            end_time: "2024-05-01T21:00".into(),
            guests: "2".into(),
        };

        assert!(view.check_availability(&query).await);
        assert_eq!(view.render_availability().unwrap().items().len(), 2);
        assert_eq!(view.status().message(), Some("2 tables are available"));
    }
}
