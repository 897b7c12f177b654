//! Document parsing utilities
//!
//! This module contains specialized parsing functions for different
//! document elements.

pub(crate) mod formatting;
pub(crate) mod heading;
pub(crate) mod list;
pub(crate) mod numbering;
pub(crate) mod table;
