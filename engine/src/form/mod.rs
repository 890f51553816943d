//! Form bindings — per-field state machine over the schema engine

mod binding;
mod orchestrator;
mod submit;
mod value_path;

pub use binding::{FieldContext, FieldInfo, FormBinding, FormOptions, HighLevelValidator};
pub use orchestrator::ChangeOutcome;
pub use submit::{SubmitDebouncer, SubmitTicket};
pub use value_path::{value_at, write_at};
