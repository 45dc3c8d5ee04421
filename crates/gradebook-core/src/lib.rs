//! Core types and trait definitions for the gradebook.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

#![allow(async_fn_in_trait)]

pub mod error;
pub mod grade;
pub mod store;
pub mod student;
pub mod user;

pub use error::{Error, Result};
