// Data models (structs)
pub mod cache;
pub mod catalog;
pub mod feedback;
pub mod settings;
pub mod view;

pub use cache::*;
pub use catalog::*;
pub use feedback::*;
pub use settings::*;
pub use view::*;
