pub mod catalog;
pub mod gateway;
pub mod host;
pub mod manifest;
pub mod toggle;
pub mod worker;

pub use catalog::PluginCatalog;
pub use gateway::{HttpGateway, PluginGateway};
pub use manifest::{Plugin, PluginId};
pub use toggle::ToggleController;
