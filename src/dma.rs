//! OAM DMA transfer functions and structures.

use std::fmt::{self, Display, Formatter};

use crate::{consts::DMA_ADDR, mmu::BusComponent, warnln};

/// Total duration, in CPU cycles, of an OAM DMA transfer: 160 bytes
/// copied at a rate of one byte per 4 cycles.
const DMA_TOTAL_CYCLES: u16 = 648;

/// Number of bytes copied into OAM by a single OAM DMA transfer.
const DMA_LENGTH: u16 = 160;

/// OAM DMA controller, copying 160 bytes from `source` into OAM at a
/// fixed rate of one byte per 4 CPU cycles, over a total of 648 cycles.
pub struct Dma {
    source: u16,
    offset: u16,
    value_dma: u8,
    cycles_dma: u16,
    active_dma: bool,
}

impl Dma {
    pub fn new() -> Self {
        Self {
            source: 0x0,
            offset: 0x0,
            value_dma: 0x0,
            cycles_dma: 0x0,
            active_dma: false,
        }
    }

    pub fn reset(&mut self) {
        self.source = 0x0;
        self.offset = 0x0;
        self.value_dma = 0x0;
        self.cycles_dma = 0x0;
        self.active_dma = false;
    }

    /// Advances the in-progress transfer by `cycles`, copying one byte
    /// for every 4 cycles elapsed, and returns the source offsets that
    /// became due to be copied into OAM this step, in order, for the
    /// caller (the bus, which owns both ROM/RAM and OAM) to apply.
    pub fn clock(&mut self, cycles: u16) -> Vec<u16> {
        let mut offsets = Vec::new();
        if !self.active_dma {
            return offsets;
        }

        let mut remaining = cycles;
        while remaining >= 4 && self.active_dma {
            remaining -= 4;
            self.cycles_dma += 4;

            if self.offset < DMA_LENGTH {
                offsets.push(self.offset);
                self.offset += 1;
            }

            if self.cycles_dma >= DMA_TOTAL_CYCLES {
                self.active_dma = false;
            }
        }

        offsets
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            // 0xFF46 — DMA: OAM DMA source address & start
            DMA_ADDR => self.value_dma,
            _ => {
                warnln!("Reading from unknown DMA location 0x{:04x}", addr);
                #[allow(unreachable_code)]
                0xff
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // 0xFF46 — DMA: OAM DMA source address & start
            DMA_ADDR => {
                self.value_dma = value;
                self.source = (value as u16) << 8;
                self.offset = 0;
                self.cycles_dma = 0;
                self.active_dma = true;
            }
            _ => warnln!("Writing to unknown DMA location 0x{:04x}", addr),
        }
    }

    pub fn source(&self) -> u16 {
        self.source
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn value_dma(&self) -> u8 {
        self.value_dma
    }

    pub fn cycles_dma(&self) -> u16 {
        self.cycles_dma
    }

    pub fn active_dma(&self) -> bool {
        self.active_dma
    }

    pub fn active(&self) -> bool {
        self.active_dma
    }

    pub fn description(&self) -> String {
        format!(
            "active: {}, cycles: {}, offset: {}, source: 0x{:04x}, value: 0x{:02x}",
            self.active_dma, self.cycles_dma, self.offset, self.source, self.value_dma
        )
    }
}

impl BusComponent for Dma {
    fn read(&self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}

impl Default for Dma {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Dma {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::Dma;

    #[test]
    fn test_dma_default() {
        let dma = Dma::default();
        assert!(!dma.active_dma);
        assert!(!dma.active());
    }

    #[test]
    fn test_dma_reset() {
        let mut dma = Dma::new();
        dma.source = 0x1234;
        dma.offset = 0x12;
        dma.value_dma = 0xff;
        dma.cycles_dma = 0x12;
        dma.active_dma = true;

        dma.reset();

        assert_eq!(dma.source, 0x0);
        assert_eq!(dma.offset, 0x0);
        assert_eq!(dma.value_dma, 0x0);
        assert_eq!(dma.cycles_dma, 0x0);
        assert!(!dma.active_dma);
    }

    #[test]
    fn test_write_starts_transfer_from_page() {
        let mut dma = Dma::new();
        dma.write(0xff46, 0xc0);
        assert!(dma.active());
        assert_eq!(dma.source(), 0xc000);
        assert_eq!(dma.offset(), 0);
    }

    #[test]
    fn test_clock_copies_one_byte_per_four_cycles() {
        let mut dma = Dma::new();
        dma.write(0xff46, 0xc0);
        let offsets = dma.clock(4);
        assert_eq!(offsets, vec![0]);
        assert_eq!(dma.offset(), 1);
        assert!(dma.active());
    }

    #[test]
    fn test_clock_deactivates_after_total_cycles() {
        let mut dma = Dma::new();
        dma.write(0xff46, 0xc0);
        let mut total_writes = 0;
        for _ in 0..162 {
            total_writes += dma.clock(4).len();
        }
        assert_eq!(total_writes, 160);
        assert!(!dma.active());
        assert_eq!(dma.offset(), 160);
    }
}
