pub mod facts;
pub mod portfolio;
