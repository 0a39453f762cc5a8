#![doc = include_str!("../README.md")]

pub mod bench;
pub mod common;
pub mod counter;
pub mod error;
pub mod pad;

pub mod prelude {
    //! The prelude re-exports all the common structs/enums used for basic
    //! counter simulation.

    pub use crate::{
        bench::{Bench, Config},
        common::{Clock, Reset, ResetKind, Revision},
        counter::{Counter, Ctrl, Pins, PowerUpState},
        error::{Error, Result},
        pad::{PadLevel, PadOutputs, Port},
    };
}
