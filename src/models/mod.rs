//! Database models shared across the dashboard repository.

pub mod activity;
pub mod company;
#[cfg(feature = "server")]
pub mod config;
pub mod contact;
pub mod deal;
pub mod manager;
pub mod meeting;
pub mod prospect;
pub mod todo;
