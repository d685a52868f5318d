//! Station-to-client sync contract
//!
//! Best-effort, at-most-once per change. A dropped packet leaves the client
//! stale until the next change-triggered sync; there is no ack or retry.

use crate::core::types::RecipeId;

/// Payloads the station pushes to observing players
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationPacket {
    /// The matched recipe reference changed
    UpdateRecipe(RecipeId),
    /// The result changed without a recipe change
    RefreshScreen,
}

/// Unidirectional, fire-and-forget delivery seam
pub trait SyncChannel: Send + Sync {
    fn send(&self, packet: StationPacket);
}

/// Discards every packet; for hosts without observers
pub struct NullChannel;

impl SyncChannel for NullChannel {
    fn send(&self, _packet: StationPacket) {}
}

/// Records packets in order; used by tests and debugging hosts
#[derive(Default)]
pub struct RecordingChannel {
    packets: std::sync::Mutex<Vec<StationPacket>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<StationPacket> {
        std::mem::take(&mut self.packets.lock().unwrap())
    }
}

impl SyncChannel for RecordingChannel {
    fn send(&self, packet: StationPacket) {
        self.packets.lock().unwrap().push(packet);
    }
}
