//! View model
//!
//! Pure functions from `(catalog, view state)` to render instructions.
//! Every state change re-renders the whole grid; there is no diffing.

pub mod filter;
pub mod labels;
pub mod model;
pub mod sort;
pub mod text;

pub use filter::{CategoryFilter, filter_products};
pub use labels::Label;
pub use model::{CategoryTab, ErrorPanel, ProductCard, ViewModel, ViewState, render, render_error};
pub use sort::{SortRule, sort_products};
pub use text::{render_error_text, render_text};
