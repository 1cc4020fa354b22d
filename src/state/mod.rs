mod editor_state;
mod load;

pub use editor_state::{EditorState, TextAction, TextTool, ToolMode};
pub use load::{BackgroundImage, LoadState, LoadTicket};
