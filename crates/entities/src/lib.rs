//! Core entity definitions for Pantry.
//!
//! This crate defines the data types shared across the Pantry application:
//! recipes and the users who author, save, and follow them.

mod recipe;
mod user;

pub use recipe::*;
pub use user::*;
