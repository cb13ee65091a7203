pub mod product_service;
pub use product_service::ProductService;
pub mod production_service;
pub use production_service::ProductionService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod scrap_service;
pub use scrap_service::ScrapService;
