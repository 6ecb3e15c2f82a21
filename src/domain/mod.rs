// Domain layer: content and contact models plus the delivery port.

pub mod model;
pub mod ports;
