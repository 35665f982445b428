//! In-process publish/subscribe used to decouple overlays from the main loop.
//!
//! [`HandlerBus`] is a synchronous, priority-ordered dispatcher over JSON
//! payloads. [`ChannelManager`] layers targeted `"{target}:{event}"` naming
//! and async request/response on top of it.

mod channels;
mod handlers;

pub use channels::{channel_name, ChannelManager, DEFAULT_REQUEST_TIMEOUT};
pub use handlers::{BusStats, HandlerBus, HandlerResult, SubscribeOptions, Subscription};

#[cfg(test)]
mod tests;
