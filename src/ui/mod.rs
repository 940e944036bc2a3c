//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: per-region renderers
//! - [`helpers`]: char-width aware text utilities and highlighting
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    ColumnLayout, ConfirmView, DisplayRow, EmptyState, FieldView, FooterInfo, FormView,
    HeaderInfo, SearchBarInfo, UIViewModel,
};
