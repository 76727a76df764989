//! Validation engine for checking submitted tables against constraint sets.

mod engine;
mod failure;

pub use engine::{validate, ValidationEngine};
pub use failure::{FailureReason, FailureRecord};
