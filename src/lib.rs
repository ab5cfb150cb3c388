//! # PDF Scout
//!
//! Fetches the list of PDF documents published by a remote file-hosting API,
//! downloads them into a local directory, and searches their text.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Catalog    │──▶│  Downloader  │──▶│  downloads/  │
//! │ (remote API) │   │ (streamed)   │   │   *.pdf      │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │
//!                                  ┌───────────┴──────────┐
//!                                  ▼                      ▼
//!                            ┌──────────┐          ┌────────────┐
//!                            │ Extract  │─────────▶│   Search   │
//!                            │ (pages)  │          │  (linear)  │
//!                            └──────────┘          └────────────┘
//! ```
//!
//! The same operations are served over HTTP ([`server`]) and driven from the
//! `pdfscout` CLI.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Shared data types |
//! | [`remote`] | Outbound HTTP client |
//! | [`catalog`] | Remote catalog fetcher |
//! | [`download`] | Single and bulk document downloads |
//! | [`extract`] | PDF text extraction |
//! | [`search`] | Substring search over local documents |
//! | [`server`] | HTTP facade |
//! | [`logging`] | Tracing subscriber setup |

pub mod catalog;
pub mod config;
pub mod download;
pub mod extract;
pub mod logging;
pub mod models;
pub mod remote;
pub mod search;
pub mod server;
