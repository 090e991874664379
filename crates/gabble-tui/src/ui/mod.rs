//! Layout helpers and reusable widgets.

pub mod layout;
pub mod widgets;

pub use layout::*;
pub use widgets::*;
