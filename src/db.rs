pub mod schema;
mod filters;

pub mod lookup_repo;
pub use lookup_repo::LookupRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod production_repo;
pub use production_repo::ProductionRepository;
pub mod scrap_repo;
pub use scrap_repo::ScrapRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
