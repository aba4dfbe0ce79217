pub mod appointment;
pub mod business;
pub mod identity;
pub mod notification;
pub mod service;
