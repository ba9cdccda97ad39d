// Domain layer: report models and the task port shared by the three tools.

pub mod model;
pub mod ports;
