pub mod order_dto;
pub mod vehicle_dto;
