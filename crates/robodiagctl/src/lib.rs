//! Robodiag Control - operator CLI for robot diagnosis
//!
//! Reads an exported logs + state snapshot and runs it through the
//! diagnosis requester, or shows the prompt that would be sent.

pub mod commands;
pub mod logging;
