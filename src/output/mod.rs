pub mod formatter;

pub use formatter::{
    format_mark, format_percent, format_records_table, format_results, format_setup,
    question_display_order, should_use_colors, use_colors,
};
