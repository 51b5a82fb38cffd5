mod header;
mod utils;

pub use header::draw_header;
pub use utils::{ensure_valid_selection, format_price, status_color, truncate};
