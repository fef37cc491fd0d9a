//! Shared types for the table booking client
//!
//! Wire models and request/response DTOs for the reservation API.
//! Field names follow the server's camelCase JSON.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use models::{
    Availability, AvailabilityQuery, DiningTable, DiningTableCreate, Reservation,
    ReservationCreate, ReservationStatus, Restaurant, RestaurantCreate,
};
pub use response::{Created, ErrorBody};
