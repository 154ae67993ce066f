pub mod assignment;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod navigator;
pub mod plugin;
pub mod segmenter;

pub use assignment::{GestureKey, KeyAssignment, KeyPolicies, PolicyKind};
pub use config::Config;
pub use document::{Direction, Document, LineView, Selection, TextBuffer, TextPosition};
pub use error::{ConfigError, NavigationError};
pub use navigator::{NavigationOutcome, Navigator, Span};
pub use plugin::WordNav;
pub use segmenter::{SegmentationPolicy, boundaries};
