//! [`ReportTransport`] over the embassy report channel.
//!
//! `notify` never blocks the input cycle: a full queue drops the report,
//! the next tick carries fresh state anyway.

use airpointer::config::REPORT_QUEUE_DEPTH;
use airpointer::hid::ReportProfile;
use airpointer::{ReportTransport, TransportError};
use defmt::{debug, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use super::Outbound;

pub struct ChannelTransport {
    channel: &'static Channel<CriticalSectionRawMutex, Outbound, REPORT_QUEUE_DEPTH>,
    enabled: bool,
    dropped: u32,
}

impl ChannelTransport {
    pub const fn new(
        channel: &'static Channel<CriticalSectionRawMutex, Outbound, REPORT_QUEUE_DEPTH>,
    ) -> Self {
        Self {
            channel,
            enabled: false,
            dropped: 0,
        }
    }
}

impl ReportTransport for ChannelTransport {
    fn set_delivery(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            // Stale movement must not reach the next host.
            self.channel.clear();
        }
        debug!("report delivery {}", if enabled { "armed" } else { "disarmed" });
    }

    fn notify(&mut self, profile: ReportProfile, payload: &[u8]) -> Result<(), TransportError> {
        if !self.enabled {
            return Err(TransportError::NotifyFailed);
        }

        let payload = Vec::from_slice(payload).map_err(|_| TransportError::PayloadSize)?;
        self.channel
            .try_send(Outbound { profile, payload })
            .map_err(|_| {
                self.dropped = self.dropped.wrapping_add(1);
                if self.dropped % 64 == 1 {
                    warn!("report queue full, {} dropped so far", self.dropped);
                }
                TransportError::QueueFull
            })
    }
}
