//! Request middleware: session layer and flash messages.

pub mod flash;
pub mod session;

pub use flash::FlashMessage;
pub use session::create_session_layer;
