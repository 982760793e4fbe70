pub mod device_sink;
pub mod host_service;
