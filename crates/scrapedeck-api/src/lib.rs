//! Async client for the scrapedeck website-scraping service.
//!
//! The service owns all scraping, screenshot capture, and persistence;
//! this crate is pure transport. Six endpoints, one envelope shape:
//!
//! | call | method + path |
//! |---|---|
//! | list     | `GET /api/data` |
//! | get one  | `GET /api/data/{id}` |
//! | scrape   | `POST /api/scrape` |
//! | save     | `POST /api/save` |
//! | delete   | `POST /api/delete` |
//! | export   | `GET /api/download-csv` |
//!
//! JSON endpoints wrap their payload as `{ "data": ... }`; [`ApiClient`]
//! strips the envelope and maps HTTP failures into the typed [`Error`].

pub mod client;
pub mod error;
pub mod model;

pub use client::ApiClient;
pub use error::Error;
pub use model::CompanyRecord;
