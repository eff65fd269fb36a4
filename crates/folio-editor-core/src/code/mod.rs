//! Code block editing: surfaces, sessions, and the single- and
//! multi-file editors.

pub mod drag;
pub mod session;
pub mod single;
pub mod surface;
pub mod tabs;

pub use drag::{move_item, DragCommit, DragFrame, StripGeometry, TabDrag, TabRect};
pub use session::{run_detection, CodeSession, DetectRequest};
pub use single::CodeEditor;
pub use surface::{CodeSurface, PlainSurface};
pub use tabs::CodeFilesEditor;
