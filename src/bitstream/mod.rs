//! The bitstream module forms the I/O subsystem of huffzip.
//!
//! - bitpacker: packs variable length codes into bytes, most significant bit first.
//! - bitwriter: writes the file header and streams the packed payload to any `Write`.
//! - bitreader: reads the payload back from any `Read` and walks the code tree.
//!
//! This I/O subsystem is designed to interface with the other modules within huffzip. It is not
//! intended for more general use.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitwriter;
