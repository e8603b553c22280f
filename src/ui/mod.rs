//! Terminal UI.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: renderable state
//! - [`renderer`]: entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor and width utilities
//! - [`theme`]: colour schemes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Body, CipherPanel, FooterInfo, HeaderInfo, KeyField, OptionView, QuestionView, QuizPanel, TabInfo,
    ToastInfo, UIViewModel,
};
