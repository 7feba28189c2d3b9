//! Solr implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! talking to a Solr core over HTTP.

mod client;

pub use client::SolrClient;
