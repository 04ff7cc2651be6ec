//! Business logic services

pub mod member_service;

pub use member_service::MemberService;
