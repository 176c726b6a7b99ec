pub mod attainment;
pub mod engine;
pub mod input;
pub mod session;
pub mod types;

pub use attainment::{attainment, percent, Attainment, CoAttainment};
pub use engine::{aggregate, check_mark};
pub use input::{parse_mark_entries, parse_mark_entry};
pub use session::MarkingSession;
pub use types::{CalculatedMarks, CoMark, ObtainedMarks, QuestionMark, StudentRecord};
