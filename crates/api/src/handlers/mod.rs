pub mod availability;
pub mod event;
