//! Session state: the document being edited plus the view state that
//! refers into it, and the derived render scene.

mod clock;
mod config;
mod highlight;
mod scene;
mod store;

pub use clock::{Clock, SavedIndicator, SystemClock};
pub use config::SessionConfig;
pub use highlight::{ConnectedIds, Highlight, connected_ids};
pub use scene::{Scene, SceneEdge, SceneNode};
pub use store::{SessionSnapshot, SessionStore, ViewState};

#[cfg(test)]
pub(crate) use clock::ManualClock;
