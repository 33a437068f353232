//! assassin - target-chain client for the assassin party game
//!
//! Talks to the chain backend over HTTP: uploads a roster to get a target
//! chain, turns that chain into a readable artifact, triggers the email
//! dispatch and handles selfie check-ins.

pub mod backend;
pub mod chain;
pub mod checkin;
pub mod config;
pub mod error;
pub mod roster;
pub mod session;
pub mod submit;
pub mod types;
