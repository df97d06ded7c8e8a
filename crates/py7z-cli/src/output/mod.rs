//! Output formatting module.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;
pub use human::ListStyle;

use human::HumanFormatter;
use json::JsonFormatter;

/// Creates a listing formatter based on CLI flags
pub fn create_formatter(
    json: bool,
    style: ListStyle,
    human_readable: bool,
) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(style, human_readable))
    }
}
