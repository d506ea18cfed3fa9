// Display module - palette conversion and the desktop window

pub mod framebuffer;
pub mod palette;
pub mod window;

pub use framebuffer::FrameBuffer;
pub use window::{run_window, WindowConfig};
