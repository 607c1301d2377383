mod catalog_vm;
mod course_vm;
mod markdown_vm;

pub use catalog_vm::{CourseCardVm, course_cards};
pub use course_vm::{CourseRunVm, RunIntent, RunOutcome, UNANSWERED_MESSAGE, tier_message};
pub use markdown_vm::{markdown_to_html, sanitize_html};
