//! # glint-engine
//!
//! Lexical metrics, syntax highlighting and copy/paste tokens for Groovy sources.
//!
//! File Layout
//!
//!     The engine is a single pass over a file's token stream. Modules follow the data, from
//!     bytes to published records:
//!
//!     src/
//!       ├── source        decoding and line/column arithmetic
//!       ├── lexing        logos token kinds and the positioned token stream
//!       ├── accounting    code lines, comment lines, "has code" markers
//!       ├── highlighting  kind→category table and the annotation state machine
//!       ├── spans         classified, positioned spans
//!       ├── emission      sink contract, highlighting and copy/paste records
//!       ├── engine        per-file analysis and publishing
//!       ├── batch         concurrent runs over many files
//!       └── complexity    folding of external analyzer results
//!
//!     Everything that mutates while a file is lexed (line counters, annotation state, the
//!     span list) is created per file. The only shared state is the read-only category table
//!     and the [`Settings`].

pub mod accounting;
pub mod batch;
pub mod collector;
pub mod complexity;
pub mod emission;
pub mod engine;
pub mod highlighting;
pub mod input;
pub mod lexing;
pub mod source;
pub mod spans;
pub mod testing;

pub use accounting::LineMeasures;
pub use batch::{Batch, BatchSummary};
pub use collector::{FileReport, ReportCollector};
pub use complexity::{ClassResults, ComplexityMeasures};
pub use emission::{AnalysisSink, CpdToken, FileFailure, HighlightRange};
pub use engine::{analyze_file, process_file, publish, AnalysisError, FileAnalysis, Settings};
pub use highlighting::HighlightCategory;
pub use input::{FileKind, InputFile};
pub use source::Encoding;
