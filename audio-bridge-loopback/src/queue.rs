/// Fixed-capacity circular byte queue.
///
/// Overflow drops the oldest bytes, so a stalled reader cannot wedge the
/// writer. Wrap in `parking_lot::Mutex` for cross-thread access.
#[derive(Debug)]
pub struct ByteRing {
    buffer: Vec<u8>,
    write_index: usize,
    read_index: usize,
    available: usize,
    capacity: usize,
}

impl ByteRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            write_index: 0,
            read_index: 0,
            available: 0,
            capacity,
        }
    }

    /// Append bytes, dropping the oldest on overflow.
    ///
    /// If `bytes` is larger than the whole ring, only its tail is kept.
    pub fn write(&mut self, bytes: &[u8]) {
        if bytes.is_empty() || self.capacity == 0 {
            return;
        }
        let bytes = if bytes.len() > self.capacity {
            &bytes[bytes.len() - self.capacity..]
        } else {
            bytes
        };

        let overflow = (self.available + bytes.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            self.read_index = (self.read_index + overflow) % self.capacity;
            self.available -= overflow;
        }

        let first = bytes.len().min(self.capacity - self.write_index);
        self.buffer[self.write_index..self.write_index + first].copy_from_slice(&bytes[..first]);
        let rest = &bytes[first..];
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.write_index = (self.write_index + bytes.len()) % self.capacity;
        self.available += bytes.len();
    }

    /// Move up to `dst.len()` bytes out of the ring. Returns bytes moved.
    pub fn read_into(&mut self, dst: &mut [u8]) -> usize {
        let count = dst.len().min(self.available);
        if count == 0 {
            return 0;
        }
        let first = count.min(self.capacity - self.read_index);
        dst[..first].copy_from_slice(&self.buffer[self.read_index..self.read_index + first]);
        dst[first..count].copy_from_slice(&self.buffer[..count - first]);
        self.read_index = (self.read_index + count) % self.capacity;
        self.available -= count;
        count
    }

    /// Read and remove up to `count` bytes.
    pub fn read(&mut self, count: usize) -> Vec<u8> {
        let mut out = vec![0; count.min(self.available)];
        let moved = self.read_into(&mut out);
        out.truncate(moved);
        out
    }

    pub fn len(&self) -> usize {
        self.available
    }

    pub fn is_empty(&self) -> bool {
        self.available == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.write_index = 0;
        self.read_index = 0;
        self.available = 0;
    }
}
