//! Restaurant section

use std::sync::Arc;

use shared::{Restaurant, RestaurantCreate};

use super::Confirm;
use crate::api::BookingApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::view::{Node, StatusRegion, counted, restaurant_item, restaurant_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestaurantTab {
    #[default]
    List,
    /// Admin only
    Create,
}

pub struct RestaurantView<H: HttpClient = NetworkHttpClient> {
    api: Arc<BookingApi<H>>,
    tab: RestaurantTab,
    restaurants: Option<Vec<Restaurant>>,
    detail: Option<Restaurant>,
    status: StatusRegion,
}

impl<H: HttpClient> RestaurantView<H> {
    pub fn new(api: Arc<BookingApi<H>>) -> Self {
        Self {
            api,
            tab: RestaurantTab::default(),
            restaurants: None,
            detail: None,
            status: StatusRegion::default(),
        }
    }

    pub fn tab(&self) -> RestaurantTab {
        self.tab
    }

    /// Switch tabs. The create tab is only offered to admins.
    pub fn show_tab(&mut self, tab: RestaurantTab) -> bool {
        if tab == RestaurantTab::Create && !self.api.session().is_admin() {
            return false;
        }
        self.tab = tab;
        true
    }

    pub fn status(&self) -> &StatusRegion {
        &self.status
    }

    /// Last loaded list, rendered for the current viewer
    pub fn render(&self) -> Option<Node> {
        let viewer = self.api.session().user();
        self.restaurants
            .as_deref()
            .map(|list| restaurant_list(list, viewer.as_ref()))
    }

    /// Last restaurant fetched with [`show`](Self::show)
    pub fn render_detail(&self) -> Option<Node> {
        let admin = self.api.session().is_admin();
        self.detail.as_ref().map(|r| restaurant_item(r, admin))
    }

    /// Cached name of a listed restaurant
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.restaurants
            .as_deref()?
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
    }

    pub(crate) fn reset(&mut self) {
        self.tab = RestaurantTab::List;
        self.restaurants = None;
        self.detail = None;
        self.status.clear();
    }

    /// Fetch all restaurants and replace the displayed list
    pub async fn list(&mut self) -> bool {
        self.status.clear();
        match self.api.list_restaurants().await {
            Ok(list) => {
                if !list.is_empty() {
                    self.status.success(format!(
                        "Loaded {}",
                        counted(list.len(), "restaurant", "restaurants")
                    ));
                }
                self.restaurants = Some(list);
                true
            }
            Err(e) => {
                self.status.failure("Failed to load restaurants", &e);
                false
            }
        }
    }

    /// Reload after a mutation, keeping the mutation's status message
    async fn reload(&mut self) {
        match self.api.list_restaurants().await {
            Ok(list) => self.restaurants = Some(list),
            Err(e) => self.status.failure("Failed to load restaurants", &e),
        }
    }

    pub async fn show(&mut self, id: &str) -> bool {
        self.status.clear();
        match self.api.get_restaurant(id).await {
            Ok(restaurant) => {
                self.detail = Some(restaurant);
                true
            }
            Err(e) => {
                self.status.failure("Failed to load restaurant", &e);
                false
            }
        }
    }

    pub async fn create(&mut self, form: &RestaurantCreate) -> bool {
        self.status.clear();
        match self.api.create_restaurant(form).await {
            Ok(created) => {
                tracing::info!(id = %created.id, "Restaurant created");
                self.status
                    .success(format!("Restaurant created. ID: {}", created.id));
                self.tab = RestaurantTab::List;
                self.reload().await;
                true
            }
            Err(e) => {
                self.status.failure("Failed to create restaurant", &e);
                false
            }
        }
    }

    /// Delete after confirmation. Declining sends nothing and leaves the
    /// status region empty.
    pub async fn delete(&mut self, id: &str, name: &str, confirm: &dyn Confirm) -> bool {
        self.status.clear();
        let prompt = format!(
            "Delete restaurant \"{}\"?\n\nIts tables and reservations may be affected.",
            name
        );
        if !confirm.confirm(&prompt) {
            return false;
        }

        match self.api.delete_restaurant(id).await {
            Ok(()) => {
                tracing::info!(%id, "Restaurant deleted");
                self.status
                    .success(format!("Restaurant \"{}\" deleted", name));
                self.reload().await;
                true
            }
            Err(e) => {
                self.status.failure("Failed to delete restaurant", &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHttpClient;
    use crate::session::{AuthSession, SessionManager};
    use crate::ui::AssumeYes;
    use serde_json::json;
    use shared::UserInfo;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&self, _prompt: &str) -> bool {
            false
        }
    }

    fn cafe_json() -> serde_json::Value {
        json!({"id":"r1","name":"Cafe A","address":"1 Main St","openTime":"08:00","closeTime":"20:00","createdAt":"2024-01-01T00:00:00Z"})
    }

    fn view(mock: MockHttpClient, role: Option<&str>) -> RestaurantView<MockHttpClient> {
        let session = SessionManager::in_memory();
        if let Some(role) = role {
            session.sign_in(AuthSession {
                token: "tok".into(),
                user: UserInfo {
                    id: "u1".into(),
                    name: "Alice".into(),
                    role: role.into(),
                    email: None,
                    created_at: None,
                },
            });
        }
        RestaurantView::new(Arc::new(BookingApi::new(mock, session)))
    }

    #[tokio::test]
    async fn test_list_renders_one_item() {
        let mock = MockHttpClient::new();
        mock.respond("GET", "/restaurants", json!([cafe_json()]));
        let mut view = view(mock, None);

        assert!(view.list().await);
        let node = view.render().unwrap();
        assert_eq!(node.items().len(), 1);
        let text = node.render_text();
        assert!(text.contains("Cafe A"));
        assert!(text.contains("1 Main St"));
        assert_eq!(view.status().message(), Some("Loaded 1 restaurant"));
    }

    #[tokio::test]
    async fn test_empty_list_renders_placeholder() {
        let mock = MockHttpClient::new();
        mock.respond("GET", "/restaurants", json!([]));
        let mut view = view(mock, None);

        assert!(view.list().await);
        assert!(view.render().unwrap().is_placeholder());
    }

    #[tokio::test]
    async fn test_list_failure_keeps_previous_list() {
        let mock = MockHttpClient::new();
        mock.respond("GET", "/restaurants", json!([cafe_json()]));
        mock.fail("GET", "/restaurants", 500, "HTTP 500: Internal Server Error");
        let mut view = view(mock, None);

        view.list().await;
        assert!(!view.list().await);
        assert_eq!(view.render().unwrap().items().len(), 1);
        assert!(view.status().is_error());
    }

    #[tokio::test]
    async fn test_create_reloads_list() {
        let mock = MockHttpClient::new();
        mock.respond("POST", "/restaurants", json!({"id": "r1", "name": "Cafe A"}));
        mock.respond("GET", "/restaurants", json!([cafe_json()]));
        let mut view = view(mock, Some("admin"));
        assert!(view.show_tab(RestaurantTab::Create));

        let form = RestaurantCreate {
            name: "Cafe A".into(),
            address: "1 Main St".into(),
            open_time: "08:00".into(),
            close_time: "20:00".into(),
        };
        assert!(view.create(&form).await);
        assert_eq!(view.status().message(), Some("Restaurant created. ID: r1"));
        assert_eq!(view.tab(), RestaurantTab::List);
        assert_eq!(view.name_of("r1"), Some("Cafe A"));

        let calls = view.api.http().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].token.as_deref(), Some("tok"));
        assert_eq!(calls[0].body.as_ref().unwrap()["openTime"], "08:00");
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mut view = view(MockHttpClient::new(), Some("admin"));
        assert!(!view.delete("r1", "Cafe A", &Decline).await);
        assert!(view.api.http().calls().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_after_list_leaves_no_status() {
        let mock = MockHttpClient::new();
        mock.respond("GET", "/restaurants", json!([cafe_json()]));
        let mut view = view(mock, Some("admin"));

        assert!(view.list().await);
        assert_eq!(view.status().message(), Some("Loaded 1 restaurant"));

        assert!(!view.delete("r1", "Cafe A", &Decline).await);
        assert!(view.status().line().is_none());
        assert_eq!(view.api.http().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads() {
        let mock = MockHttpClient::new();
        mock.respond("DELETE", "/restaurants/r1", json!({}));
        mock.respond("GET", "/restaurants", json!([]));
        let mut view = view(mock, Some("admin"));

        assert!(view.delete("r1", "Cafe A", &AssumeYes).await);
        assert_eq!(view.status().message(), Some("Restaurant \"Cafe A\" deleted"));
        assert!(view.render().unwrap().is_placeholder());
    }

    #[tokio::test]
    async fn test_delete_action_follows_role() {
        let mock = MockHttpClient::new();
        mock.respond("GET", "/restaurants", json!([cafe_json()]));
        let mut view = view(mock, Some("user"));
        view.list().await;

        assert!(view.render().unwrap().actions().is_empty());
        assert!(!view.show_tab(RestaurantTab::Create));
        assert_eq!(view.tab(), RestaurantTab::List);
    }
}
