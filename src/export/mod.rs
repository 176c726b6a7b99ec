pub mod csv;

pub use csv::{default_file_name, export_csv};
