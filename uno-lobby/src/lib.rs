//! Game lobby around the `uno-engine` round.
//!
//! Games live in a [`repository::GameRepository`], each behind its own
//! lock. [`service::GameService`] implements the requests players make
//! (create, join, start, play, draw, declare, catch) and broadcasts a
//! [`snapshot::GameSnapshot`] after each change.

pub mod action;
pub mod config;
pub mod error;
pub mod repository;
pub mod service;
pub mod snapshot;
