pub mod dom;
pub mod input;
pub mod js;
pub mod session;

pub use session::BrowserSession;
