//! Client interface: the dynamic proxy and the call executor beneath it.

pub mod builder;
pub mod core;
pub mod proxy;

pub use self::core::{Client, DEFAULT_BASE_ADDRESS};
pub use builder::ApiBuilder;
pub use proxy::Api;
