//! Session state machine for the tray timer.
//!
//! - `intent.rs`: user commands and the shell loop's [`Flow`]
//! - `controller.rs`: [`SessionController`], the countdown task and intent dispatch
//!
//! # Usage
//!
//! ```ignore
//! use pomotray::session::{Intent, SessionController};
//!
//! let controller = SessionController::new(settings, store, audio, tray_tx);
//! controller.publish_initial().await;
//! controller.dispatch(Intent::Toggle).await;
//! ```

mod controller;
mod intent;

pub use controller::SessionController;
pub use intent::{Flow, Intent};
