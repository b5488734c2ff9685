// stockroom_dashboard/src/services/mod.rs

pub mod order_sync;
