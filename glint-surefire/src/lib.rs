//! # glint-surefire
//!
//! Reads surefire-style `TEST-*.xml` documents into a per-class [`UnitTestIndex`].
//!
//! ```text
//!     report      results and per-class accumulation
//!     reader      streaming quick-xml handler for one document
//!     index       class name → report, loading from files and directories
//! ```

pub mod index;
pub mod reader;
pub mod report;

pub use index::UnitTestIndex;
pub use reader::ReportError;
pub use report::{TestStatus, UnitTestClassReport, UnitTestResult};
