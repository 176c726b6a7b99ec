pub mod marks;
pub mod prompt;
pub mod setup;

pub use marks::run_marks_entry;
pub use prompt::Prompter;
pub use setup::run_setup_wizard;
