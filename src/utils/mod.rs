pub mod context_window;

pub use context_window::context_window;
