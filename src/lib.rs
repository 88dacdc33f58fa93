//! Daybrief - Newsletter Account & Topic Preference Core
//!
//! This crate implements the session and topic-preference core of the
//! Daybrief newsletter app: sign-in/sign-up/sign-out state, per-user profile
//! documents, and the topic selection editor. Authentication and persistence
//! are delegated to an external identity service and document store reached
//! through the adapters in [`adapters`].

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
