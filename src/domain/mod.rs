// Domain layer: card models and the ports the builder depends on.

pub mod model;
pub mod ports;
