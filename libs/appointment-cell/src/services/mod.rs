pub mod gateway;
pub mod lifecycle;
pub mod schedule;
pub mod store;
