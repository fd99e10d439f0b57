// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    ListOptions, STDIN_SOURCE, collect_links, execute_links_list, init_tracing, open_source,
    run_links_list,
};
