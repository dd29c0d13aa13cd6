pub mod app;
pub mod components;
pub mod interop;
pub mod sidebar;
pub mod styles;

pub use app::*;
pub use components::*;
pub use interop::*;
pub use sidebar::*;
