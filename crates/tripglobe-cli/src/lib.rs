//! tripglobe-cli
//! =============
//!
//! Command-line interface for the `tripglobe-core` travel globe core.
//!
//! The `tripglobe-cli` binary loads a travel-record export, prints how the
//! globe would cluster it, and replays scripted interaction sessions. The
//! library target carries only this page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install tripglobe-cli
//! tripglobe-cli --help
//! tripglobe-cli -i trips.json stats
//! tripglobe-cli -i trips.json clusters --mode country
//! tripglobe-cli classify jp
//! tripglobe-cli -i trips.json replay events.json --auto-complete
//! ```
//!
//! Event scripts are JSON arrays of events tagged by `type`, e.g.
//! `{"type":"ZoomLevelChanged","altitude":1.5}` or
//! `{"type":"ClusterClicked","entry_id":"country:JPN"}`.
//!
//! To drive a globe from code, depend on [`tripglobe-core`].
//!
//! Links
//! -----
//! - Repository: <https://github.com/holg/tripglobe-rs>
//! - Core crate: <https://docs.rs/tripglobe-core>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
