//! # Core Application Logic
//!
//! This module contains Atlas's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • ordering + clock     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │ countries  │
//!            │  Adapter   │            │ (REST /    │
//!            │ (ratatui)  │            │  snapshot) │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`ordering`]: Listing filter and sort engine
//! - [`clock`]: Local time from a UTC offset label
//! - [`record`]: The `CountryRecord` domain type and display fallbacks
//! - [`config`]: Layered configuration

pub mod action;
pub mod clock;
pub mod config;
pub mod ordering;
pub mod record;
pub mod state;
