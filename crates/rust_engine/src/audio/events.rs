//! Events the mixer pushes onto the shared [`LockFreeMessageQueue`] and the
//! optional lifecycle callbacks a caller can install on the mixer.

use crate::audio::stream::StreamId;

/// Tag byte for a [`StreamEvent::Stopped`] encoded onto the mixer's message
/// queue.
pub const STREAM_EVENT_STOPPED_TAG: u8 = 1;

/// Events a mixer may emit about a stream's lifecycle. `event_start`/
/// `event_stop` (see `AudioMixer::set_event_callback`) are best-effort
/// notifications, modeled here as a single callback over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    /// A stream was installed into a mixer slot and began playing.
    Started(StreamId),
    /// A stream's `accumulate_samples` returned fewer frames than requested;
    /// the mixer retired its slot.
    Stopped(StreamId),
}

impl StreamEvent {
    /// Decode an event pushed onto the mixer's message queue: a one-byte tag
    /// (1 = `Stopped`) followed by an eight-byte little-endian `StreamId`.
    /// Returns `None` for an unrecognized tag or a short buffer.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let (&tag, rest) = bytes.split_first()?;
        let id = rest.get(..8)?.try_into().ok().map(u64::from_le_bytes)?;
        match tag {
            STREAM_EVENT_STOPPED_TAG => Some(StreamEvent::Stopped(id)),
            _ => None,
        }
    }
}
