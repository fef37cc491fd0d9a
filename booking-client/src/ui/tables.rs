//! Table section

use std::sync::Arc;

use shared::{DiningTable, DiningTableCreate};

use crate::api::BookingApi;
use crate::form::{parse_int, required};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::view::{Node, StatusRegion, counted, table_list};
use crate::ClientResult;

/// Create-table form as typed by the user
#[derive(Debug, Clone, Default)]
pub struct TableForm {
    pub name: String,
    pub capacity: String,
}

impl TableForm {
    fn to_payload(&self) -> ClientResult<DiningTableCreate> {
        Ok(DiningTableCreate {
            name: self.name.clone(),
            capacity: parse_int(&self.capacity, "Capacity")?,
        })
    }
}

pub struct TableView<H: HttpClient = NetworkHttpClient> {
    api: Arc<BookingApi<H>>,
    /// Restaurant whose tables are displayed
    restaurant_id: Option<String>,
    tables: Option<Vec<DiningTable>>,
    create_form_open: bool,
    status: StatusRegion,
}

impl<H: HttpClient> TableView<H> {
    pub fn new(api: Arc<BookingApi<H>>) -> Self {
        Self {
            api,
            restaurant_id: None,
            tables: None,
            create_form_open: false,
            status: StatusRegion::default(),
        }
    }

    pub fn status(&self) -> &StatusRegion {
        &self.status
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    pub fn render(&self) -> Option<Node> {
        self.tables.as_deref().map(table_list)
    }

    pub fn is_create_form_open(&self) -> bool {
        self.create_form_open
    }

    /// Show or hide the create form. Admin only.
    pub fn toggle_create_form(&mut self) -> bool {
        if !self.api.session().is_admin() {
            return false;
        }
        self.create_form_open = !self.create_form_open;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.restaurant_id = None;
        self.tables = None;
        self.create_form_open = false;
        self.status.clear();
    }

    /// List tables of a restaurant. A blank id is rejected before any request.
    pub async fn list(&mut self, restaurant_id: &str) -> bool {
        let id = match required(restaurant_id, "Please enter a restaurant ID") {
            Ok(id) => id.to_string(),
            Err(e) => {
                self.status.failure("Failed to load tables", &e);
                return false;
            }
        };

        self.status.clear();
        let result = self.api.list_tables(&id).await;
        self.restaurant_id = Some(id);
        match result {
            Ok(tables) => {
                if !tables.is_empty() {
                    self.status.success(format!(
                        "Loaded {}",
                        counted(tables.len(), "table", "tables")
                    ));
                }
                self.tables = Some(tables);
                true
            }
            Err(e) => {
                self.status.failure("Failed to load tables", &e);
                false
            }
        }
    }

    pub async fn create(&mut self, restaurant_id: &str, form: &TableForm) -> bool {
        let prepared = required(restaurant_id, "Please enter a restaurant ID first")
            .and_then(|id| Ok((id.to_string(), form.to_payload()?)));
        let (id, payload) = match prepared {
            Ok(p) => p,
            Err(e) => {
                self.status.failure("Failed to create table", &e);
                return false;
            }
        };

        self.status.clear();
        match self.api.create_table(&id, &payload).await {
            Ok(created) => {
                tracing::info!(id = %created.id, restaurant = %id, "Table created");
                self.status
                    .success(format!("Table created. ID: {}", created.id));
                match self.api.list_tables(&id).await {
                    Ok(tables) => self.tables = Some(tables),
                    Err(e) => self.status.failure("Failed to load tables", &e),
                }
                self.restaurant_id = Some(id);
                true
            }
            Err(e) => {
                self.status.failure("Failed to create table", &e);
                false
            }
        }
    }
}
