//! Request handlers organized by domain

pub mod approvals;
pub mod audit;
pub mod commands;
pub mod health;
pub mod rules;
pub mod users;
