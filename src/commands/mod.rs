// Command handlers - one file per domain
pub mod feed;
pub mod feedback;
pub mod views;
