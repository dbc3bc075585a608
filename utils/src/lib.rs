pub mod deadline;
pub mod review;
pub mod scoring;
pub mod slipdays;
