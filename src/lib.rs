//! Footnote consolidation for HTML documents
//!
//!     Scans document blocks for inline annotation markers (footnote-classed
//!     spans and cited blockquotes), relocates their content into an ordered
//!     footnote list, and wires bidirectional navigation links between each
//!     original location and its consolidated entry.
//!
//! Architecture
//!
//!     - extract: marker → normalized payload, plus the consumed-state
//!       mutation of the marker (pluggable via the Extract trait)
//!     - destination: locate-or-create the list that collects a group's
//!       entries
//!     - dedupe: serialized-markup identity search over existing entries
//!     - links: forward references, back-reference groups, and the
//!       letter-suffix scheme for repeated references
//!     - processor: drives marker discovery and per-marker dispatch, one
//!       group per block
//!
//!     The document tree is the markup5ever_rcdom tree, parsed and
//!     serialized with html5ever, and is always passed explicitly. The pass
//!     is single-threaded and runs to completion; the only shared mutable
//!     resource is the tree itself.
//!
//!     The file structure :
//!     .
//!     ├── config.rs       # TOML configuration layering
//!     ├── dedupe.rs
//!     ├── destination.rs
//!     ├── dom.rs          # RcDom helpers shared by every module
//!     ├── error.rs
//!     ├── extract.rs
//!     ├── links.rs
//!     ├── options.rs      # recognized option surface and defaults
//!     ├── processor.rs
//!     └── selector.rs     # the small marker-selector grammar
//!
//! Generated markup
//!
//!     Entry ids (`cite-text-<group>-<index>`), reference ids
//!     (`cite-ref-<group>-<index>` with an `-<occurrence>` suffix for
//!     repeats), and the marker classes (`footnoteLink`, `footnoteBackref`,
//!     `footnoteContent`, `footnoteBackReferenceGroup`, `footnotesList`) are
//!     reproduced exactly for compatibility with existing stylesheets.

pub mod config;
pub mod dedupe;
pub mod destination;
pub mod dom;
pub mod error;
pub mod extract;
pub mod links;
pub mod options;
pub mod processor;
pub mod selector;

pub use error::FootnoteError;
pub use extract::{DefaultExtractor, Extract, Payload};
pub use options::Options;
pub use processor::{consolidate, process_html};
pub use selector::{Selector, SelectorList};
