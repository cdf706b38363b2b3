//! TriageFlow - Voice-driven symptom triage
//!
//! This crate answers telephony webhooks: a caller describes how they feel,
//! an external classifier picks out the symptoms, and the service speaks back
//! general guidance for each one.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
