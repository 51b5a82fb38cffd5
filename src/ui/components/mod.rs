mod footer;
mod input;

pub use footer::{draw_footer, StatusKind, StatusLine};
pub use input::{InputResult, TextInput};
