use crate::models::error::SessionError;

/// Something that displays or exports a live stream from a device.
pub trait StreamConsumer {
    type Device;
    /// Stream object handed to a recorder.
    type Stream;

    /// Attach to `device`, replacing any previous binding.
    fn bind(&mut self, device: &Self::Device) -> Result<(), SessionError>;

    /// Release the stream and any rendering resources.
    fn stop(&mut self);

    /// The live stream, or `None` while unbound.
    fn stream(&self) -> Option<Self::Stream>;

    /// Human readable name of the stream (e.g. "depth", "color").
    fn label(&self) -> String;
}
