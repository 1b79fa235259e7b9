use crate::models::error::SessionError;

/// A recording sink provided by the sensor middleware.
pub trait Recorder {
    type Stream;

    /// Attach a stream. Must be called before `start`.
    fn add_stream(&mut self, stream: &Self::Stream, allow_lossy: bool) -> Result<(), SessionError>;

    fn start(&mut self) -> Result<(), SessionError>;

    /// Flush and stop writing.
    fn stop(&mut self);

    /// Free the recorder. Called after `stop`, or on a failed start.
    fn destroy(self);
}
