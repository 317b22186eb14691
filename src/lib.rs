//! FilterFE — a small interactive image filter utility.
//!
//! The crate is split the usual way: a UI-free core (`session`, `ops`,
//! `dispatch`, `io`, `display`) that is fully testable without a window, and
//! the thin frontends on top of it (`app` for the GUI menu, `cli` for
//! headless runs).

#[macro_use]
pub mod logger;

pub mod app;
pub mod cli;
pub mod components;
pub mod dispatch;
pub mod display;
pub mod io;
pub mod ops;
pub mod session;
pub mod settings;
