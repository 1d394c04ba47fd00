#![cfg(feature = "std")]
use std::io::{BufWriter, Write};

use crate::bytestream::{QByteIoError, QByteWriterTrait};

impl<W: Write> QByteWriterTrait for &mut BufWriter<W> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), QByteIoError> {
        self.write_all(buf).map_err(QByteIoError::StdIoError)
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), QByteIoError> {
        self.write_all_bytes(buf)
    }
    fn flush_bytes(&mut self) -> Result<(), QByteIoError> {
        self.flush().map_err(QByteIoError::StdIoError)
    }
    fn reserve_capacity(&mut self, _: usize) -> Result<(), QByteIoError> {
        Ok(())
    }
}
