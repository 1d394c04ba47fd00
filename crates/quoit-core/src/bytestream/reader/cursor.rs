use crate::bytestream::{QByteIoError, QByteReaderTrait};

/// An in memory cursor over anything that can be viewed as bytes
///
/// This is the reader the codecs use for `&[u8]`, `Vec<u8>` and
/// fixed arrays.
pub struct QCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> QCursor<T> {
    pub fn new(buffer: T) -> QCursor<T> {
        QCursor {
            stream:   buffer,
            position: 0
        }
    }
    #[inline(always)]
    fn bytes_left(&self) -> usize {
        self.stream.as_ref().len().saturating_sub(self.position)
    }
}

impl<T: AsRef<[u8]>> QByteReaderTrait for QCursor<T> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, QByteIoError> {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(QByteIoError::NotEnoughBytes(1, 0))
        }
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), QByteIoError> {
        let left = self.bytes_left();
        if left < N {
            return Err(QByteIoError::NotEnoughBytes(N, left));
        }
        buf.copy_from_slice(&self.stream.as_ref()[self.position..self.position + N]);
        self.position += N;
        Ok(())
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, QByteIoError> {
        Ok(self.bytes_left() == 0)
    }

    #[inline(always)]
    fn q_position(&mut self) -> Result<u64, QByteIoError> {
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn remaining(&mut self) -> Result<usize, QByteIoError> {
        Ok(self.bytes_left())
    }
}
