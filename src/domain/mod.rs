pub mod amount;
pub mod method;
pub mod phone;
pub mod ports;
pub mod transaction;
