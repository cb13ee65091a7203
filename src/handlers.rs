pub mod dashboard;
pub mod health;
pub mod lookups;
pub mod production;
pub mod products;
pub mod scrap;
