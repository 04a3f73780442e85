//! Editor-facing queries over resolved scopes.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: all queries go through an [`Analysis`] taken from the [`AnalysisHost`]
//! 2. **No LSP types**: uses our own types, converted at the LSP boundary
//! 3. **Never fails**: missing files and stale positions yield empty results
//!
//! ## Usage
//!
//! ```ignore
//! use webscope::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("app.html", "<todo-item done></todo-item>");
//! host.set_container("app.html", container);
//!
//! let analysis = host.analysis();
//! let items = analysis.completions(file, offset);
//! ```

mod analysis;
mod completion;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use text_utils::{extract_word_at, word_prefix_at};
