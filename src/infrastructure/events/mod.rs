mod in_process_bus;

pub use in_process_bus::InProcessEventBus;
