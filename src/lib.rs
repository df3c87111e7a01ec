//! Chest X-ray screening: YOLO detection on uploaded images and
//! reconciliation of detections against reference annotations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
