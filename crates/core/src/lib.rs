#![forbid(unsafe_code)]

pub mod answers;
pub mod certificate;
pub mod classify;
pub mod model;
pub mod scoring;
pub mod time;

pub use answers::AnswerSheet;
pub use certificate::{Certificate, CertificateError};
pub use classify::{Classification, ResultTier, certificate_eligible, classify};
pub use scoring::{QuizResult, score};
pub use time::Clock;
