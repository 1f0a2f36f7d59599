mod fir_dto;

pub use fir_dto::{FirRegisteredDto, FirResponseDto, RegisterFirDto};
