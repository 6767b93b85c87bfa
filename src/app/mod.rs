// ABOUTME: View-model layer: observable state, subscribers, and the hide timer

pub mod notification;
pub mod observers;
pub mod state;

pub use notification::DEFAULT_HIDE_DELAY;
pub use observers::{Property, SubscriberId};
pub use state::LogPaneViewModel;
