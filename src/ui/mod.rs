pub mod style;

pub use style::{LayoutTokens, LAYOUT_TOKENS};
