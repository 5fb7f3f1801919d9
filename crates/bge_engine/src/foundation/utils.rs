//! Miscellaneous helpers

use chrono::Local;

/// Current local time as text
///
/// With `use_underscores` the result is safe to embed in file names.
pub fn system_time_string(use_underscores: bool) -> String {
    let format = if use_underscores {
        "%Y_%m_%d_%H_%M_%S"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    Local::now().format(format).to_string()
}

/// String representation of a boolean
pub const fn bool_to_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
