//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain/api layers.
//!
//! # Architecture
//!
//! ```text
//! Key / host event → Event → handle_event → state transition → Actions → host calls
//!                                ↑                                  │
//!                                └──── WebRequestResult / Timer ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`display`]: Display-priority policy (banners, load-more visibility)
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modal`]: Enlarged image view state
//! - [`modes`]: Input mode type
//! - [`search`]: Query/page/result orchestration with fetch generations
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod display;
pub mod handler;
pub mod modal;
pub mod modes;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modal::ModalState;
pub use modes::InputMode;
pub use search::{FetchCommand, SearchState};
pub use state::AppState;
