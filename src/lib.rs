//! Centerline Library
//!
//! Calibration checkpoint catalog for packaging lines: the point and module
//! collections with their storage, the map and phasing-dial projections, SVG
//! rendering for screen and print, deep links with QR image requests, and the
//! command-line and HTTP front ends built on top of them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod projection;
pub mod qr;
pub mod services;

#[cfg(feature = "web")]
pub mod web;
