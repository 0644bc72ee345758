//! # gate-service
//!
//! Application layer containing the admission pipeline, admin use cases,
//! and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ApprovalService, AuditService, CommandService, RuleService, SeedService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
