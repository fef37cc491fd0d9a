//! View components: resource lists as node trees

use chrono::{DateTime, Local, Utc};
use shared::{Availability, DiningTable, Reservation, Restaurant, UserInfo};

use super::{Action, Node};

/// Timestamp in the viewer's local zone
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Restaurant list. Delete actions only appear for admin viewers.
pub fn restaurant_list(restaurants: &[Restaurant], viewer: Option<&UserInfo>) -> Node {
    if restaurants.is_empty() {
        return Node::Placeholder("No restaurants yet".into());
    }
    let admin = viewer.is_some_and(UserInfo::is_admin);
    Node::List(
        restaurants
            .iter()
            .map(|r| restaurant_item(r, admin))
            .collect(),
    )
}

pub fn restaurant_item(restaurant: &Restaurant, with_delete: bool) -> Node {
    let mut children = vec![
        Node::Heading(format!("🏪 {}", restaurant.name)),
        Node::field("ID", &restaurant.id),
        Node::field("Address", &restaurant.address),
        Node::field(
            "Hours",
            format!("{} - {}", restaurant.open_time, restaurant.close_time),
        ),
        Node::field("Created", format_time(&restaurant.created_at)),
    ];
    if with_delete {
        children.push(Node::Action(Action::DeleteRestaurant {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
        }));
    }
    Node::Item(children)
}

pub fn table_list(tables: &[DiningTable]) -> Node {
    if tables.is_empty() {
        return Node::Placeholder("This restaurant has no tables yet".into());
    }
    Node::List(
        tables
            .iter()
            .map(|t| {
                Node::Item(vec![
                    Node::Heading(format!("🪑 {}", t.name)),
                    Node::field("ID", &t.id),
                    Node::field("Capacity", format!("{} guests", t.capacity)),
                    Node::field("Restaurant ID", &t.restaurant_id),
                ])
            })
            .collect(),
    )
}

/// Reservation list. Cancelled reservations offer no cancel action.
pub fn reservation_list(reservations: &[Reservation]) -> Node {
    if reservations.is_empty() {
        return Node::Placeholder("You have no reservations".into());
    }
    Node::List(reservations.iter().map(reservation_item).collect())
}

pub fn reservation_item(reservation: &Reservation) -> Node {
    let mut children = vec![
        Node::Heading(format!("📅 Reservation {}", reservation.id)),
        Node::field("Restaurant ID", &reservation.restaurant_id),
        Node::field("Table ID", &reservation.table_id),
        Node::field(
            "Time",
            format!(
                "{} - {}",
                format_time(&reservation.start_time),
                format_time(&reservation.end_time)
            ),
        ),
        Node::field("Guests", reservation.guests.to_string()),
        Node::field("Status", reservation.status.label()),
        Node::field("Created", format_time(&reservation.created_at)),
    ];
    if !reservation.status.is_cancelled() {
        children.push(Node::Action(Action::CancelReservation {
            id: reservation.id.clone(),
        }));
    }
    Node::Item(children)
}

pub fn availability_list(slots: &[Availability]) -> Node {
    if slots.is_empty() {
        return Node::Placeholder("No table is free for that time".into());
    }
    Node::List(
        slots
            .iter()
            .map(|s| {
                Node::Item(vec![
                    Node::Heading(format!("🪑 Table {}", s.table_id)),
                    Node::field("Capacity", format!("{} guests", s.capacity)),
                ])
            })
            .collect(),
    )
}

/// Login status line: who is signed in and with which role
pub fn user_badge(user: &UserInfo) -> Node {
    Node::Item(vec![
        Node::Heading(format!("👤 {}", user.name)),
        Node::field("Role", &user.role),
    ])
}
