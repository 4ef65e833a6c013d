//! Connection-gated report delivery.
//!
//! The radio's connect/disconnect callbacks run in their own execution
//! context. They touch exactly one thing, a [`LinkFlag`], through the
//! [`ConnectionEvents`] capability. The tick loop owns a
//! [`ConnectionGate`] and calls [`ConnectionGate::sync`] once per tick;
//! that is the only place the two-state machine moves and the transport
//! gets armed or disarmed. Sends in between use the synced state.
//!
//! A stale read is harmless: at worst one report is wasted on a link
//! that just dropped, or one report is skipped on a link that just came
//! up.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::TransportError;
use crate::hid::ReportProfile;

/// Connect/disconnect notifications from the transport.
pub trait ConnectionEvents {
    fn on_connect(&self);
    fn on_disconnect(&self);
}

/// Connectivity flag shared between the radio context (writer) and the
/// tick loop (reader).
#[derive(Debug)]
pub struct LinkFlag {
    connected: AtomicBool,
}

impl LinkFlag {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl Default for LinkFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionEvents for LinkFlag {
    fn on_connect(&self) {
        self.connected.store(true, Ordering::Release);
    }

    fn on_disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

/// Per-profile write + notify primitive of the radio.
pub trait ReportTransport {
    /// Arm (`true`) or disarm (`false`) report delivery. Disarming drops
    /// anything buffered for the old connection.
    fn set_delivery(&mut self, enabled: bool);

    /// Hand one encoded report to the radio.
    fn notify(&mut self, profile: ReportProfile, payload: &[u8]) -> Result<(), TransportError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    #[default]
    Disconnected,
    Connected,
}

/// A transition observed by the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    Connected,
    Disconnected,
}

/// Decides whether encoded reports may reach the transport.
pub struct ConnectionGate<'a, T> {
    flag: &'a LinkFlag,
    state: LinkState,
    transport: T,
    sent: u32,
    failed: u32,
}

impl<'a, T: ReportTransport> ConnectionGate<'a, T> {
    /// Starts `Disconnected` with delivery disarmed, whatever the flag says;
    /// the first [`sync`](Self::sync) catches up.
    pub fn new(flag: &'a LinkFlag, mut transport: T) -> Self {
        transport.set_delivery(false);
        Self {
            flag,
            state: LinkState::Disconnected,
            transport,
            sent: 0,
            failed: 0,
        }
    }

    /// Apply the latest connectivity flag to the state machine.
    pub fn sync(&mut self) -> Option<LinkEvent> {
        let event = match (self.state, self.flag.is_connected()) {
            (LinkState::Disconnected, true) => LinkEvent::Connected,
            (LinkState::Connected, false) => LinkEvent::Disconnected,
            _ => return None,
        };

        match event {
            LinkEvent::Connected => {
                self.state = LinkState::Connected;
                self.transport.set_delivery(true);
            }
            LinkEvent::Disconnected => {
                self.state = LinkState::Disconnected;
                self.transport.set_delivery(false);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("link: {} (sent={}, failed={})", event, self.sent, self.failed);

        Some(event)
    }

    /// Forward one report if the last [`sync`](Self::sync) saw the link
    /// up. Returns whether the transport accepted it. A flag change since
    /// then waits for the next sync.
    pub fn send(&mut self, profile: ReportProfile, payload: &[u8]) -> bool {
        if self.state == LinkState::Disconnected {
            return false;
        }

        match self.transport.notify(profile, payload) {
            Ok(()) => {
                self.sent = self.sent.wrapping_add(1);
                true
            }
            Err(_e) => {
                self.failed = self.failed.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("link: {} report dropped: {}", profile, _e);
                false
            }
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Reports accepted by the transport since startup.
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Reports the transport refused since startup.
    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
