//! Browser test command library for the Vista frontend.
//!
//! Commands are thin async scripts over a [`BrowserDriver`](driver::BrowserDriver)
//! implementation; [`WebDriverBrowser`] drives a real browser. Database
//! fixtures go through `vista-db` and API calls through
//! [`ApiClient`](api::ApiClient).

pub mod api;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod seed;
pub mod webdriver;

pub use config::E2eConfig;
pub use driver::BrowserDriver;
pub use error::{E2eError, E2eResult};
pub use webdriver::WebDriverBrowser;
