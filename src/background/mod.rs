mod service;

pub use service::BackgroundService;
