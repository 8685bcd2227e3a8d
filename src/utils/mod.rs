//! Utilities module aggregator exposing the empty-device helpers and testing helpers.

pub mod null_device;
