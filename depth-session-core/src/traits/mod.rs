pub mod device_provider;
pub mod recorder;
pub mod session_delegate;
pub mod stream_consumer;
