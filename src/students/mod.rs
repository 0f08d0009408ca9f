//! Roster subsystem: administrative student CRUD
//!
//! One flat document per student, keyed by a store-assigned id, with an
//! email-uniqueness invariant across the collection. Mutations run as
//! validate -> resolve -> whitelisted merge -> persist; queries build a
//! predicate from optional search/status/sort parameters.

mod pipeline;
mod query;
mod record;
mod sample;
mod store;

pub use pipeline::RosterService;
pub use query::{filter_and_sort, StudentQuery};
pub use record::{student_rules, Student, StudentStatus};
pub use sample::sample_students;
pub use store::{MemoryStudentStore, StudentStore};
