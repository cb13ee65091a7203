pub mod dashboard;
pub mod lookups;
pub mod page;
pub mod product;
pub mod production;
pub mod scrap;
