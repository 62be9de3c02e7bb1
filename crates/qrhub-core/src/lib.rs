//! # QRHub Core
//!
//! The domain layer of QRHub.
//! This crate contains the business rules for issuing access tokens and
//! managing QR code images, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
