mod central_panel;
mod header;
mod search_panel;
mod tools_panel;

pub use central_panel::{CanvasOutput, central_panel};
pub use header::{HeaderAction, editor_header};
pub use search_panel::{SearchAction, search_panel};
pub use tools_panel::tools_panel;
