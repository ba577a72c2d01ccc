/// Console adapters for terminal output
mod table_renderer;

pub use table_renderer::TableRenderer;
