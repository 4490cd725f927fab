// Domain layer: station model, ratio rules and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod services;
