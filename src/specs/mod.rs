// src/specs/mod.rs
//! # Page/endpoint readers
//!
//! One module per remote resource. Each knows *where the data lives* in that
//! resource and how to turn it into model types:
//!
//! - `calendar` – the advent calendar HTML page → participant ids, in day order.
//! - `items` – the per-user items JSON endpoint → `model::Post`s.
//!
//! Specs only fetch and extract. Filtering, aggregation and rendering happen
//! in `scrape` and `report`. Parsers are plain functions over `&str` so they
//! can be tested offline against fixtures.
pub mod calendar;
pub mod items;
