pub mod logging;
pub mod lottery;
