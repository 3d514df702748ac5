mod gps_dto;

pub use gps_dto::{CreateGpsDto, GpsResponseDto};
