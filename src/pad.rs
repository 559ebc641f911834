//! Joypad emulation and input handling.

use crate::mmu::BusComponent;

pub struct Pad {
    down: bool,
    up: bool,
    left: bool,
    right: bool,
    start: bool,
    select: bool,
    b: bool,
    a: bool,
    selection: PadSelection,
    int_pad: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PadSelection {
    Buttons,
    DPad,
    Both,
    None,
}

pub enum PadKey {
    Up,
    Down,
    Left,
    Right,
    Start,
    Select,
    A,
    B,
}

impl Pad {
    pub fn new() -> Self {
        Self {
            down: false,
            up: false,
            left: false,
            right: false,
            start: false,
            select: false,
            b: false,
            a: false,
            selection: PadSelection::None,
            int_pad: false,
        }
    }

    pub fn reset(&mut self) {
        self.down = false;
        self.up = false;
        self.left = false;
        self.right = false;
        self.start = false;
        self.select = false;
        self.b = false;
        self.a = false;
        self.selection = PadSelection::None;
        self.int_pad = false;
    }

    /// Builds the low nibble reported for the currently selected
    /// row(s), ORing both rows together when `Both` is selected, a
    /// low bit meaning the corresponding button is pressed.
    fn nibble(&self) -> u8 {
        let buttons = if self.a { 0x00 } else { 0x01 }
            | if self.b { 0x00 } else { 0x02 }
            | if self.select { 0x00 } else { 0x04 }
            | if self.start { 0x00 } else { 0x08 };
        let dpad = if self.right { 0x00 } else { 0x01 }
            | if self.left { 0x00 } else { 0x02 }
            | if self.up { 0x00 } else { 0x04 }
            | if self.down { 0x00 } else { 0x08 };
        match self.selection {
            PadSelection::Buttons => buttons,
            PadSelection::DPad => dpad,
            PadSelection::Both => buttons & dpad,
            PadSelection::None => 0x0f,
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr & 0x00ff {
            0x0000 => {
                let selection_bits = match self.selection {
                    PadSelection::DPad => 0x10,
                    PadSelection::Buttons => 0x20,
                    PadSelection::Both => 0x00,
                    PadSelection::None => 0x30,
                };
                selection_bits | self.nibble() | 0xc0
            }
            addr => {
                crate::warnln!("Reading from unknown Pad location 0x{:04x}", addr);
                0xff
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr & 0x00ff {
            0x0000 => {
                self.selection = match value & 0x30 {
                    0x00 => PadSelection::Both,
                    0x10 => PadSelection::Buttons,
                    0x20 => PadSelection::DPad,
                    _ => PadSelection::None,
                };
            }
            addr => crate::warnln!("Writing to unknown Pad location 0x{:04x}", addr),
        }
    }

    pub fn key_press(&mut self, key: PadKey) {
        let before = self.nibble();
        self.set_key(key, true);
        self.update_int(before);
    }

    pub fn key_lift(&mut self, key: PadKey) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: PadKey, pressed: bool) {
        match key {
            PadKey::Up => self.up = pressed,
            PadKey::Down => self.down = pressed,
            PadKey::Left => self.left = pressed,
            PadKey::Right => self.right = pressed,
            PadKey::Start => self.start = pressed,
            PadKey::Select => self.select = pressed,
            PadKey::A => self.a = pressed,
            PadKey::B => self.b = pressed,
        }
    }

    /// A press that newly clears a bit that the selected row was
    /// reporting as high raises the joypad interrupt, mirroring the
    /// falling-edge behavior of P10-P13 on real hardware.
    fn update_int(&mut self, before: u8) {
        let after = self.nibble();
        if before & !after != 0 {
            self.int_pad = true;
        }
    }

    #[inline(always)]
    pub fn int_pad(&self) -> bool {
        self.int_pad
    }

    #[inline(always)]
    pub fn set_int_pad(&mut self, value: bool) {
        self.int_pad = value;
    }

    #[inline(always)]
    pub fn ack_pad(&mut self) {
        self.set_int_pad(false);
    }
}

impl BusComponent for Pad {
    fn read(&self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}

impl Default for Pad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Pad, PadKey, PadSelection};

    #[test]
    fn test_select_buttons_reports_action_row() {
        let mut pad = Pad::new();
        pad.write(0xff00, 0x10);
        pad.key_press(PadKey::A);
        let value = pad.read(0xff00);
        assert_eq!(value & 0x01, 0x00);
    }

    #[test]
    fn test_select_both_ors_rows() {
        let mut pad = Pad::new();
        pad.write(0xff00, 0x00);
        assert_eq!(pad.selection, PadSelection::Both);
        pad.key_press(PadKey::A);
        pad.key_press(PadKey::Right);
        let value = pad.read(0xff00);
        assert_eq!(value & 0x01, 0x00);
    }

    #[test]
    fn test_key_press_raises_interrupt_on_selected_row() {
        let mut pad = Pad::new();
        pad.write(0xff00, 0x10);
        assert!(!pad.int_pad());
        pad.key_press(PadKey::Start);
        assert!(pad.int_pad());
    }

    #[test]
    fn test_key_press_no_interrupt_when_row_not_selected() {
        let mut pad = Pad::new();
        pad.write(0xff00, 0x20);
        pad.key_press(PadKey::Start);
        assert!(!pad.int_pad());
    }
}
