pub mod actions;
pub mod bus;
pub mod errors;
pub mod events;
pub mod id;
pub mod store;
pub mod types;

pub use actions::Action;
pub use bus::{ChannelManager, HandlerBus, SubscribeOptions, Subscription};
pub use errors::{ArviewError, BusError, ConfigError, PlatformError};
pub use events::{Event, EventBus};
pub use id::{new_id, TabId, WorkspaceId};
pub use store::{MemoryStore, StateStore, StateStoreExt};
pub use types::{Margins, Rect, TabKind};

pub type Result<T> = std::result::Result<T, ArviewError>;
