pub mod access;
pub mod admin;
pub mod devices;
pub mod health;
