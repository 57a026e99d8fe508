pub mod capture_use_case;
pub mod frame_gate;
pub mod frame_processor;
pub mod frame_scheduler;
pub mod pipeline_logger;
