//! The counter state machine.
//!
//! An 8-bit up-counter with a synchronous load, modeled one clock edge at a
//! time. The load strobe is active-low and edge-detected through a one-tick
//! shadow register, so a load lands on the first edge that samples the line
//! low after an edge that sampled it high.

use crate::{
    common::{Clock, Reset, ResetKind, Revision},
    pad::{PadOutputs, Port},
};
use bitflags::bitflags;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

bitflags! {
    /// Control lines decoded from the revision's control port.
    ///
    /// Rev A decodes these from `dedicated_in`; rev B from `bidir_in`.
    #[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[must_use]
    pub struct Ctrl: u8 {
        /// Load strobe, active-low. A falling edge triggers a load.
        const LOAD_N = 1;
        /// Rev A: drive gate for the bidirectional port.
        /// Rev B: output disable for the dedicated output port.
        const GATE = 1 << 1;
    }
}

/// Register contents at power-on, before any reset has been asserted.
///
/// Real silicon powers up with unknown register state; `Random` models that.
/// The deterministic variants exist for harnesses that want reproducible
/// pre-reset behavior.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub enum PowerUpState {
    AllZeros,
    AllOnes,
    #[default]
    Random,
}

/// Input pads sampled by the tile on each clock edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Pins {
    /// Dedicated 8-bit input port. Rev A: control lines. Rev B: load payload.
    pub dedicated_in: u8,
    /// Bidirectional port, input side. Rev A: load payload. Rev B: control
    /// lines.
    pub bidir_in: u8,
    /// Active-low reset. Takes priority over everything else in the tick.
    pub reset_n: bool,
    /// Tile enable. Always high in the operating environment; sampled and
    /// discarded.
    pub enable: bool,
}

impl Default for Pins {
    fn default() -> Self {
        // Control lines idle high (deasserted), reset asserted.
        Self {
            dedicated_in: Ctrl::LOAD_N.bits(),
            bidir_in: Ctrl::LOAD_N.bits(),
            reset_n: false,
            enable: true,
        }
    }
}

/// The counter tile: an 8-bit count register plus the load-strobe shadow
/// register, advanced once per [`Clock::clock`] call.
///
/// Until the first reset the registers hold their [`PowerUpState`] contents
/// and outputs are not meaningful; a harness must assert `reset_n` (or call
/// [`Reset::reset`]) before reading outputs, exactly as with the silicon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct Counter {
    revision: Revision,
    power_up: PowerUpState,
    /// Input pads, sampled at the next clock edge. A harness sets these
    /// between ticks.
    pub pins: Pins,
    /// Current count.
    pub count: u8,
    /// Load line as sampled on the previous tick.
    pub load_prev: bool,
    /// Clock edges seen since power-on.
    pub cycle: u64,
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(Revision::default(), PowerUpState::default())
    }
}

impl Counter {
    pub fn new(revision: Revision, power_up: PowerUpState) -> Self {
        let mut counter = Self {
            revision,
            power_up,
            pins: Pins::default(),
            count: 0,
            load_prev: false,
            cycle: 0,
        };
        counter.power_on();
        counter
    }

    pub const fn revision(&self) -> Revision {
        self.revision
    }

    pub const fn power_up(&self) -> PowerUpState {
        self.power_up
    }

    /// Control lines as decoded for the active revision.
    pub fn ctrl(&self) -> Ctrl {
        let raw = match self.revision {
            Revision::A => self.pins.dedicated_in,
            Revision::B => self.pins.bidir_in,
        };
        Ctrl::from_bits_truncate(raw)
    }

    /// The load payload port for the active revision.
    #[must_use]
    pub const fn payload(&self) -> u8 {
        match self.revision {
            Revision::A => self.pins.bidir_in,
            Revision::B => self.pins.dedicated_in,
        }
    }

    /// Output pads derived from the current state and inputs. Pure; stores
    /// nothing.
    pub fn outputs(&self) -> PadOutputs {
        let ctrl = self.ctrl();
        match self.revision {
            Revision::A => PadOutputs {
                dedicated: Port::driven(0x00),
                bidir: Port {
                    value: self.count,
                    // Driven only while the load strobe is asserted and the
                    // gate bit is clear.
                    oe: if ctrl.contains(Ctrl::LOAD_N) || ctrl.contains(Ctrl::GATE) {
                        0x00
                    } else {
                        0xFF
                    },
                },
            },
            Revision::B => PadOutputs {
                dedicated: if ctrl.contains(Ctrl::GATE) {
                    Port::high_z()
                } else {
                    Port::driven(self.count)
                },
                // Pure input port.
                bidir: Port::high_z(),
            },
        }
    }

    /// Sets the input pads, advances one clock edge, and returns the
    /// resulting output pads.
    pub fn tick(&mut self, pins: Pins) -> PadOutputs {
        self.pins = pins;
        self.clock();
        self.outputs()
    }

    fn power_on(&mut self) {
        match self.power_up {
            PowerUpState::AllZeros => {
                self.count = 0x00;
                self.load_prev = false;
            }
            PowerUpState::AllOnes => {
                self.count = 0xFF;
                self.load_prev = true;
            }
            PowerUpState::Random => {
                let mut rng = rand::thread_rng();
                self.count = rng.gen();
                self.load_prev = rng.gen();
            }
        }
        self.cycle = 0;
    }
}

impl Clock for Counter {
    fn clock(&mut self) -> usize {
        self.cycle = self.cycle.wrapping_add(1);
        if !self.pins.reset_n {
            self.reset(ResetKind::Soft);
            return 1;
        }

        // Registers sample their old values simultaneously: stage every next
        // value first, commit together at the end of the tick. The edge
        // detector must compare against the previous tick's sample, never the
        // one written this tick.
        let load_line = self.ctrl().contains(Ctrl::LOAD_N);
        let load_sampled = self.load_prev;
        let next_count = if !load_line && load_sampled {
            let payload = self.payload();
            debug!("load edge, payload {payload:#04X}");
            payload
        } else {
            self.count.wrapping_add(1)
        };

        self.load_prev = load_line;
        self.count = next_count;
        trace!("cycle {}: count {:#04X}", self.cycle, self.count);
        1
    }
}

impl Reset for Counter {
    fn reset(&mut self, kind: ResetKind) {
        match kind {
            ResetKind::Soft => {
                self.count = 0;
                // Shadow register resets to the line's idle (high) level. A
                // line already low at reset release reads as a fresh falling
                // edge on the first tick.
                self.load_prev = true;
                debug!("reset");
            }
            ResetKind::Hard => self.power_on(),
        }
    }
}
