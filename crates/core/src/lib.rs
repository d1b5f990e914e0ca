//! `bizforge-core`: identifiers, errors and the traits domain types implement.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{LedgerId, ProductId};
pub use value_object::ValueObject;
