//! Multi-format workbench for MARC documents
//!
//!     This crate keeps one document consistent across four textual representations: MARC (the
//!     assignment syntax), JSON, YAML and TOML. Editing any of them recomputes the other three.
//!
//!     This is a pure lib, that is, it powers marc-cli but is shell agnostic: no code here should
//!     suppose a shell environment, be it printing to std streams, env vars etc. Logging goes
//!     through `tracing` and it is up to the binary to install a subscriber.
//!
//! Architecture
//!
//!     JSON is the pivot. Every format parses into a `serde_json::Value` and serializes from one,
//!     so adding a format means two functions instead of one per pair of formats.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── convert.rs              # Converter contract used by the hub, BabelConverter
//!     ├── formats
//!     │   ├── marc                # lexer, parser, evaluator, diagnostics, serializer, printer
//!     │   ├── json
//!     │   ├── yaml
//!     │   └── toml
//!     └── sync
//!         ├── document.rs         # FormatKind, Slot, Document
//!         ├── hub.rs              # SyncHub: transition and reformat
//!         └── loader.rs           # the initial document
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Synchronization
//!
//!     The hub takes the current document, the kind that was edited and its new text, and returns
//!     the next document. The edited text is always kept. If it cannot be read, the three other
//!     slots all show the error, since they depend on the same missing pivot. Otherwise each of
//!     them is serialized independently, and a format that cannot express the tree (TOML and
//!     `null`, say) only fails its own slot.
//!
//! Library Choices
//!
//!     JSON, YAML and TOML are handled entirely by serde_json, serde_yaml and toml. MARC is ours:
//!     logos for the lexer, a hand written recursive descent parser, and ariadne to render errors
//!     against the source.

pub mod convert;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod sync;

pub use convert::{BabelConverter, ConversionError, Converter, ErrorKind};
pub use error::FormatError;
pub use format::Format;
pub use formats::marc::formatting_rules::FormattingRules;
pub use formats::JsonOptions;
pub use registry::FormatRegistry;
pub use sync::{BootstrapError, Document, FormatKind, Slot, SlotStatus, SyncHub};
