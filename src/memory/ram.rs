/// Simple RAM backed by a Vec<u8>. Accesses that run past the end return
/// `None` so the bus can turn them into faults.
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    pub fn new(size: u32) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    #[inline(always)]
    fn range(&self, offset: u32, len: usize) -> Option<std::ops::Range<usize>> {
        let idx = offset as usize;
        let end = idx.checked_add(len)?;
        (end <= self.data.len()).then_some(idx..end)
    }

    pub fn read8(&self, offset: u32) -> Option<u8> {
        self.data.get(offset as usize).copied()
    }

    pub fn read16(&self, offset: u32) -> Option<u16> {
        let r = self.range(offset, 2)?;
        Some(u16::from_le_bytes([self.data[r.start], self.data[r.start + 1]]))
    }

    pub fn read32(&self, offset: u32) -> Option<u32> {
        let r = self.range(offset, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[r]);
        Some(u32::from_le_bytes(bytes))
    }

    pub fn write8(&mut self, offset: u32, val: u8) -> Option<()> {
        let slot = self.data.get_mut(offset as usize)?;
        *slot = val;
        Some(())
    }

    pub fn write16(&mut self, offset: u32, val: u16) -> Option<()> {
        let r = self.range(offset, 2)?;
        self.data[r].copy_from_slice(&val.to_le_bytes());
        Some(())
    }

    pub fn write32(&mut self, offset: u32, val: u32) -> Option<()> {
        let r = self.range(offset, 4)?;
        self.data[r].copy_from_slice(&val.to_le_bytes());
        Some(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copy `data` in at `offset`; false if it does not fit
    pub fn load(&mut self, data: &[u8], offset: u32) -> bool {
        match self.range(offset, data.len()) {
            Some(r) => {
                self.data[r].copy_from_slice(data);
                true
            }
            None => false,
        }
    }
}
