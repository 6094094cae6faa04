pub mod extract;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod scrapers;
