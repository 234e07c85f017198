// Domain layer: wire shapes and ports. Everything here lives for one
// request only; nothing is cached between invocations.

pub mod model;
pub mod ports;
