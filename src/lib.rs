//! RESX string-resource management
//!
//! Ordered key/value lookup over `.resx` files, idempotent merge-append
//! updates that keep every untouched byte intact, and regeneration of the
//! sibling strongly-typed accessor (`*.Designer.cs`). New entries are only
//! ever appended; existing entries are never edited in place or reordered,
//! so diffs stay minimal and downstream tools see a stable file.
//!
//! # Example
//!
//! ```
//! use resx_strings::ResxDocument;
//!
//! let source = r#"<root>
//!   <data name="Greeting" xml:space="preserve">
//!     <value>Hello</value>
//!   </data>
//! </root>"#;
//!
//! let doc = ResxDocument::parse(source).unwrap();
//! assert_eq!(doc.find_by_value("Hello").unwrap().name, "Greeting");
//!
//! let updated = doc.render_with_appended("Farewell", "Bye").unwrap();
//! assert!(updated.contains("<data name=\"Farewell\""));
//! ```

mod designer;
mod document;
mod externalize;
mod store;
mod types;
mod workspace;

pub use designer::{
    designer_path, generate_designer_source, get_class_name, member_name_for_key, parse_designer,
    regenerate_designer, DesignerInfo,
};
pub use document::{escape_xml, ResxDocument};
pub use externalize::{
    externalize_selection, EditorSurface, ExternalizeOutcome, PromptChoice, PromptSeed,
    ResourcePrompt,
};
pub use store::{add, find_by_key, find_by_value, read_document};
pub use types::{ResourceEntry, ResxError, Span};
pub use workspace::{find_first_matching_value_in, Workspace};
