//! Quimikey is a physical periodic table: a keypad microcontroller that
//! sends the element a user pressed over a serial connection, one JSON
//! object per line. This crate is the host-side companion software. It owns
//! the serial read loop, reassembles and decodes the incoming frames,
//! resolves them against an element database loaded at startup, and keeps a
//! single "currently selected element" slot that any display layer can
//! query.
//!
//! The moving parts, in the order data flows through them:
//!
//! - [`framer`] turns arbitrary serial read chunks into complete frames
//! - [`instruction`] decodes a frame into an element identifier
//! - [`elements`] is the read-only directory identifiers resolve against
//! - [`selection`] is the shared slot the reader thread writes into
//! - [`listener`] drives the whole loop on its own thread
//! - [`query`] is the surface a display consumer calls
//!
//! The embedded side lives in its own firmware repository; this crate only
//! ever sees its byte stream.

#![warn(missing_docs)]
pub mod args;
pub mod config;
pub mod dummy_source;
pub mod elements;
pub mod framer;
pub mod gui;
pub mod instruction;
pub mod listener;
pub mod query;
pub mod selection;
