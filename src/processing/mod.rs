mod config;
mod intake;
mod processor;
pub mod renderer;

pub use config::ProcessorConfig;
pub use intake::intake;
pub use processor::SequentialProcessor;
pub use renderer::render_placeholder;
