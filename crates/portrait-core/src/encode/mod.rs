//! Image encoding.
//!
//! Every artifact this pipeline writes is a PNG: cropped portraits and
//! converted JPEG scans alike.
//!
//! # Examples
//!
//! ```ignore
//! use portrait_core::encode::encode_png;
//!
//! let bytes = encode_png(&portrait)?;
//! std::fs::write("public/cardPortraits/01001.png", bytes)?;
//! ```

mod png;

pub use png::{encode_png, EncodeError};
