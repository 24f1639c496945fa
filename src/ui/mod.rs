// UI and formatting module

pub mod formatters;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{
    format_cycle_line, format_size, print_configuration, print_cycle, print_system_statistics,
};
pub use prompts::{dimmed, error, info, warn};
