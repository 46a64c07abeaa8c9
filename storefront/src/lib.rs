//! Vitrine Storefront - catalog view and admin editor
//!
//! # Module layout
//!
//! ```text
//! storefront/src/
//! ├── core/      # configuration
//! ├── view/      # filter, sort, localization, render instructions
//! ├── admin/     # edits, ordered commit, save/reload cycle
//! ├── session.rs # persisted preferences
//! ├── cli.rs     # command-line front end
//! └── utils/     # logging
//! ```

pub mod admin;
pub mod cli;
pub mod core;
pub mod session;
pub mod utils;
pub mod view;

pub use admin::{AdminEditor, AdminError, AdminResult, DocumentPaths};
pub use core::Config;
pub use session::{SessionPrefs, SessionStore};
pub use view::{ViewModel, ViewState, render};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then start logging per the environment
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
