pub mod memory;
pub mod traits;

pub use memory::{MemoryQuestionStore, MemorySubmissionStore};
pub use traits::{QuestionStore, StoreError, SubmissionStore};
