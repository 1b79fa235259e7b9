use crate::models::error::SessionError;
use crate::traits::stream_consumer::StreamConsumer;

/// Ordered list of stream consumers, in display order.
///
/// Consumers are appended and never removed one by one, except those
/// that fail to bind in `bind_all`. `stop_all` stops and drops them
/// together.
pub struct StreamRegistry<C: StreamConsumer> {
    consumers: Vec<C>,
}

impl<C: StreamConsumer> Default for StreamRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamConsumer> StreamRegistry<C> {
    pub fn new() -> Self {
        Self {
            consumers: Vec::new(),
        }
    }

    /// Append a consumer and return it.
    pub fn add(&mut self, consumer: C) -> &mut C {
        self.consumers.push(consumer);
        let last = self.consumers.len() - 1;
        &mut self.consumers[last]
    }

    /// All consumers in insertion order.
    pub fn all(&self) -> std::slice::Iter<'_, C> {
        self.consumers.iter()
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Bind every consumer to `device`.
    ///
    /// A consumer that fails to bind is stopped and dropped, the same as a
    /// new stream that fails to bind in `SessionController::add_stream`.
    /// Returns the number still registered.
    pub fn bind_all(&mut self, device: &C::Device) -> usize {
        self.consumers.retain_mut(|consumer| match consumer.bind(device) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Dropping stream {}: bind failed: {}", consumer.label(), e);
                consumer.stop();
                false
            }
        });
        self.consumers.len()
    }

    /// Stop every consumer, then clear the registry.
    pub fn stop_all(&mut self) {
        for consumer in &mut self.consumers {
            consumer.stop();
        }
        if !self.consumers.is_empty() {
            log::debug!("Stopped {} stream(s)", self.consumers.len());
        }
        self.consumers.clear();
    }

    /// Point-in-time copy of every consumer's stream, labelled.
    ///
    /// Fails if any consumer is not bound to a device.
    pub fn snapshot(&self) -> Result<Vec<(String, C::Stream)>, SessionError> {
        self.consumers
            .iter()
            .map(|consumer| {
                let label = consumer.label();
                match consumer.stream() {
                    Some(stream) => Ok((label, stream)),
                    None => Err(SessionError::RecordingStartFailed(format!(
                        "stream {} is not bound to a device",
                        label
                    ))),
                }
            })
            .collect()
    }
}
