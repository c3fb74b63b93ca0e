pub mod clipboard;
pub mod colors;
pub mod spinner;

pub use clipboard::copy_to_clipboard;
pub use colors::*;
pub use spinner::Spinner;
