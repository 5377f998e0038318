mod output_dispatcher;

pub use output_dispatcher::OutputDispatcher;
