//! TwiML output adapter.

mod renderer;

pub use renderer::{escape_xml, TwimlRenderer};
