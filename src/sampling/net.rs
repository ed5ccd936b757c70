//! Per-interface byte counter tracking.
//!
//! Each monitored interface carries two independent 32-bit wrapping
//! hardware counters (received and transmitted bytes), accumulated into
//! 64-bit running totals and differenced into bytes/second speeds. The
//! store is keyed by interface name; interfaces come and go between
//! samples, so an unknown name is simply a first observation.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use crate::sampling::delta::{CounterUpdate, RateCounter};

/// One raw reading for an interface at a single sampling instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetReading {
    /// Cumulative received bytes (32-bit wrapping register).
    pub received: u64,
    /// Cumulative transmitted bytes (32-bit wrapping register).
    pub transmitted: u64,
    /// Whether the interface is administratively up for this sample.
    pub up: bool,
    /// IPv4 address associated with the interface, when the link-layer
    /// record provides one. Recorded as a side effect only.
    pub addr: Option<Ipv4Addr>,
}

/// Speeds computed for one interface over one sampling interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetSample {
    /// Received bytes/second.
    pub recv_speed: f64,
    /// Transmitted bytes/second.
    pub trans_speed: f64,
}

/// Persisted per-interface state.
///
/// The two directions do not share wrap state: each direction wraps on its
/// own schedule.
#[derive(Debug, Clone)]
pub struct InterfaceRates {
    recv: RateCounter,
    trans: RateCounter,
    up: bool,
    addr: Option<Ipv4Addr>,
}

impl InterfaceRates {
    fn new() -> Self {
        Self {
            recv: RateCounter::wrapping32(),
            trans: RateCounter::wrapping32(),
            up: false,
            addr: None,
        }
    }

    /// Total received bytes accumulated across wraps.
    pub fn recv_total(&self) -> u64 {
        self.recv.accumulated()
    }

    /// Total transmitted bytes accumulated across wraps.
    pub fn trans_total(&self) -> u64 {
        self.trans.accumulated()
    }

    /// Last computed receive speed (bytes/second).
    pub fn recv_speed(&self) -> f64 {
        self.recv.rate()
    }

    /// Last computed transmit speed (bytes/second).
    pub fn trans_speed(&self) -> f64 {
        self.trans.rate()
    }

    /// Whether the interface was up at the last sample.
    pub fn is_up(&self) -> bool {
        self.up
    }

    /// Last recorded IPv4 address, if any was ever provided.
    pub fn addr(&self) -> Option<Ipv4Addr> {
        self.addr
    }
}

/// Counter store mapping interface names to their tracked state.
///
/// Entries are created on first observation and never destroyed here;
/// an interface that disappears simply stops being updated, and cleanup
/// (if any) is the poller's business.
#[derive(Debug, Default)]
pub struct NetRateStore {
    interfaces: HashMap<String, InterfaceRates>,
}

impl NetRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one reading for `name` observed `elapsed_secs` after the
    /// previous sample and returns the speeds for this interval.
    ///
    /// A name never seen before gets fresh state and reports zero for this
    /// sample. A down interface is marked inactive but its counters are
    /// left untouched (no decay, no reset), so the next up sample resumes
    /// from the last read values.
    pub fn sample(&mut self, name: &str, reading: NetReading, elapsed_secs: f64) -> NetSample {
        let iface = self
            .interfaces
            .entry(name.to_string())
            .or_insert_with(InterfaceRates::new);

        if let Some(addr) = reading.addr {
            iface.addr = Some(addr);
        }

        if !reading.up {
            iface.up = false;
            return NetSample::default();
        }
        iface.up = true;

        let recv: CounterUpdate = iface.recv.update(reading.received, elapsed_secs);
        let trans: CounterUpdate = iface.trans.update(reading.transmitted, elapsed_secs);

        NetSample {
            recv_speed: recv.rate,
            trans_speed: trans.rate,
        }
    }

    /// Re-baselines an interface whose counter source was replaced.
    pub fn reset(&mut self, name: &str, reading: NetReading) {
        if let Some(iface) = self.interfaces.get_mut(name) {
            iface.recv.reset(reading.received);
            iface.trans.reset(reading.transmitted);
        }
    }

    /// Looks up the tracked state for an interface.
    pub fn get(&self, name: &str) -> Option<&InterfaceRates> {
        self.interfaces.get(name)
    }

    /// Iterates over all tracked interfaces.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterfaceRates)> {
        self.interfaces.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
