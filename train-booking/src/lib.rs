//! Train booking engine.
//!
//! Station lookup, train search, result filtering, fare quotes and
//! booking confirmation over a read-only catalog of stations and trains.
//! Backend latency is simulated and every delayed operation can be
//! cancelled by its caller.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod fare;
pub mod filter;
pub mod search;
pub mod simulate;
pub mod web;
