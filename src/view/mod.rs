mod render;
mod state;

pub use render::compare_page;
pub use state::{CompareAction, CompareView};
