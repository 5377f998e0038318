pub mod dispatch;
pub mod error;
pub mod interfaces;
pub mod models;
pub mod orchestrators;
pub mod selection;
pub mod session;

pub use error::CaptureError;
