pub mod db_utils;
pub mod error;
pub mod logging;
pub mod params;
