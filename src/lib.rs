//! School Odds: a post-bac orientation form rendered as a terminal UI in the
//! browser, plus the small HTTP API it talks to.
//!
//! The browser binary (`src/main.rs`) drives [`form::FormApp`]; the native
//! server (`src/bin/server.rs`) serves [`server::router`].

pub mod data;
pub mod form;
pub mod input;
pub mod random;
pub mod storage;
pub mod widgets;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
