pub mod order_controller;
pub mod stats_controller;
pub mod vehicle_controller;

pub use order_controller::OrderController;
pub use stats_controller::StatsController;
pub use vehicle_controller::VehicleController;
