pub mod availability;
pub mod event;
pub mod health;
