pub mod gateway;
pub mod github;

pub use crate::domain::model::{GatewayRequest, GatewayResponse};
pub use crate::domain::ports::ContentsStore;
pub use crate::utils::error::Result;
