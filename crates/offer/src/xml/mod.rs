//! XML output for offers.
//!
//! The encoder drives an [`ElementWriter`]: a strict stack-based sink with
//! open / attribute / text / close / flush operations. [`XmlElementWriter`]
//! is the quick-xml backed implementation; any other markup sink that honours
//! the same contract can replace it.
//!
//! ## Output shape
//!
//! ```xml
//! <offer internal-id="42">
//!   <price>150000.50</price>
//!   <metro><name>Central</name><distance>5</distance></metro>
//! </offer>
//! ```
//!
//! Output is written without indentation or an XML declaration; the fragment
//! is meant to be embedded into a feed document by the caller.

pub mod utils;
pub mod writer;

pub use writer::{ElementWriter, XmlElementWriter};
