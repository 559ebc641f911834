//! Top level emulator structures, gluing every component to the CPU
//! scheduler and exposing the host-facing API.

use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex};

use boytacean_common::error::Error;

use crate::{
    apu::Apu,
    consts::{
        BGP_ADDR, LCDC_ADDR, NR10_ADDR, NR11_ADDR, NR12_ADDR, NR14_ADDR, NR21_ADDR, NR22_ADDR,
        NR24_ADDR, NR30_ADDR, NR31_ADDR, NR32_ADDR, NR34_ADDR, NR41_ADDR, NR44_ADDR, NR50_ADDR,
        NR51_ADDR, NR52_ADDR, OBP0_ADDR, OBP1_ADDR, SCX_ADDR, SCY_ADDR, WX_ADDR, WY_ADDR,
    },
    cpu::Cpu,
    dma::Dma,
    info::Info,
    mmu::Mmu,
    pad::{Pad, PadKey},
    ppu::{Ppu, PpuMode, DISPLAY_HEIGHT, DISPLAY_WIDTH},
    rom::{Cartridge, RamSize},
    serial::{NullDevice, Serial, SerialDevice},
    timer::Timer,
    util::{read_file, SharedThread},
};

/// Event bit set whenever the PPU has completed a new frame since
/// the last call to [`GameBoy::run_until_event`].
pub const EVENT_NEW_FRAME: u8 = 0x01;

/// Event bit set whenever the APU's audio buffer has reached its
/// configured capacity since the last call to [`GameBoy::run_until_event`].
pub const EVENT_SOUND_BUFFER_FULL: u8 = 0x02;

/// Collection of the components that are plugged into the [`Mmu`],
/// built once at construction time and then owned by it.
pub struct Components {
    pub ppu: Ppu,
    pub apu: Apu,
    pub dma: Dma,
    pub pad: Pad,
    pub timer: Timer,
    pub serial: Serial,
}

/// Snapshot of the CPU and PPU registers, useful for debugging and
/// for tests that assert against concrete machine state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Registers {
    pub pc: u16,
    pub sp: u16,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub scy: u8,
    pub scx: u8,
    pub wy: u8,
    pub wx: u8,
    pub ly: u8,
    pub lyc: u8,
}

/// Shared, mutable set of flags that decide which components are
/// currently clocked and at which base frequency audio is generated.
///
/// This exists as a single `Arc<Mutex<_>>`-backed value so components
/// owned by different parts of the tree (the [`Cpu`], the [`Mmu`], the
/// individual peripherals) can all observe the same configuration
/// without the emulator having to push updates through every layer
/// by hand.
pub struct GameBoyConfig {
    pub ppu_enabled: bool,
    pub apu_enabled: bool,
    pub dma_enabled: bool,
    pub timer_enabled: bool,
    pub serial_enabled: bool,
    pub clock_freq: u32,
}

impl GameBoyConfig {
    pub fn new() -> Self {
        Self {
            ppu_enabled: true,
            apu_enabled: true,
            dma_enabled: true,
            timer_enabled: true,
            serial_enabled: true,
            clock_freq: GameBoy::CPU_FREQ,
        }
    }
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Running totals produced by [`GameBoy::clocks_frame_buffer`], meant
/// to let a host step the emulator by a cycle budget while still being
/// told when a new frame became available.
pub struct ClockFrame {
    pub cycles: u64,
    pub frames: u32,
    frame_buffer: Option<Vec<u8>>,
}

impl ClockFrame {
    pub fn frame_buffer_eager(&mut self) -> Vec<u8> {
        self.frame_buffer.take().unwrap_or_default()
    }
}

/// Exposes the audio samples produced by the APU in a host-agnostic
/// way, so a front-end can pull PCM data without depending on the
/// concrete [`Apu`] type.
pub trait AudioProvider {
    fn audio_output(&self) -> u8;
    fn audio_buffer(&self) -> &std::collections::VecDeque<u8>;
    fn clear_audio_buffer(&mut self);
}

/// The Game Boy (DMG) emulator.
///
/// Owns the CPU (which in turn owns the [`Mmu`] and every peripheral
/// plugged into it) and drives it forward one instruction at a time,
/// clocking the rest of the hardware in lock-step with the number of
/// cycles each instruction took.
pub struct GameBoy {
    ppu_enabled: bool,
    apu_enabled: bool,
    dma_enabled: bool,
    timer_enabled: bool,
    serial_enabled: bool,
    clock_freq: u32,

    cpu: Cpu,
    gbc: SharedThread<GameBoyConfig>,
}

impl GameBoy {
    pub fn new() -> Self {
        let gbc = Arc::new(Mutex::new(GameBoyConfig::new()));

        let components = Components {
            ppu: Ppu::new(),
            apu: Apu::default(),
            dma: Dma::new(),
            pad: Pad::new(),
            timer: Timer::new(),
            serial: Serial::new(),
        };

        let mmu = Mmu::new(components, gbc.clone());
        let cpu = Cpu::new(mmu, gbc.clone());

        let mut game_boy = Self {
            ppu_enabled: true,
            apu_enabled: true,
            dma_enabled: true,
            timer_enabled: true,
            serial_enabled: true,
            clock_freq: Self::CPU_FREQ,
            cpu,
            gbc,
        };
        game_boy.reset();
        game_boy
    }

    /// Checks whether the given ROM data looks like a valid Game Boy
    /// cartridge image, without actually loading it.
    pub fn verify_rom(data: &[u8]) -> bool {
        Cartridge::from_data(data).is_ok()
    }

    /// Resets every component back to power-on state and then seeds
    /// the documented DMG post-boot register values, equivalent to
    /// having run the (unemulated) boot ROM to completion.
    pub fn reset(&mut self) {
        self.ppu().reset();
        self.apu().reset();
        self.dma().reset();
        self.pad().reset();
        self.timer().reset();
        self.serial().reset();
        self.mmu().reset();
        self.cpu.reset();
        self.boot();
    }

    /// Reloads the currently inserted cartridge, resetting the
    /// machine back to a fresh power-on (post-boot) state.
    pub fn reload(&mut self) -> Result<(), Error> {
        let rom = self.rom().clone();
        self.reset();
        self.load_cartridge(rom);
        Ok(())
    }

    /// Seeds the CPU and memory-mapped registers with the values
    /// documented for the DMG immediately after the (not emulated)
    /// boot ROM hands control over to the cartridge, per pandocs.
    fn boot(&mut self) {
        self.cpu.boot();

        self.timer().set_div_counter(0xab00);

        self.write_memory(LCDC_ADDR, 0x91);
        self.write_memory(SCY_ADDR, 0x00);
        self.write_memory(SCX_ADDR, 0x00);
        self.write_memory(WY_ADDR, 0x00);
        self.write_memory(WX_ADDR, 0x00);
        self.write_memory(BGP_ADDR, 0xfc);
        self.write_memory(OBP0_ADDR, 0xff);
        self.write_memory(OBP1_ADDR, 0xff);

        self.write_memory(NR10_ADDR, 0x80);
        self.write_memory(NR11_ADDR, 0xbf);
        self.write_memory(NR12_ADDR, 0xf3);
        self.write_memory(NR14_ADDR, 0xbf);
        self.write_memory(NR21_ADDR, 0x3f);
        self.write_memory(NR22_ADDR, 0x00);
        self.write_memory(NR24_ADDR, 0xbf);
        self.write_memory(NR30_ADDR, 0x7f);
        self.write_memory(NR31_ADDR, 0xff);
        self.write_memory(NR32_ADDR, 0x9f);
        self.write_memory(NR34_ADDR, 0xbf);
        self.write_memory(NR41_ADDR, 0xff);
        self.write_memory(NR44_ADDR, 0xbf);
        self.write_memory(NR50_ADDR, 0x77);
        self.write_memory(NR51_ADDR, 0xf3);
        self.write_memory(NR52_ADDR, 0xf1);

        self.write_memory(0xffff, 0x00);
    }

    #[inline(always)]
    fn update_cycles(&mut self, cycles: u16) {
        if self.dma_enabled {
            self.dma_clock(cycles);
        }
        if self.ppu_enabled {
            self.ppu_clock(cycles);
        }
        if self.timer_enabled {
            self.timer_clock(cycles);
        }
        if self.apu_enabled {
            self.apu_clock(cycles);
        }
        if self.serial_enabled {
            self.serial_clock(cycles);
        }
    }

    pub fn key_press(&mut self, key: PadKey) {
        self.pad().key_press(key);
    }

    pub fn key_lift(&mut self, key: PadKey) {
        self.pad().key_lift(key);
    }

    #[inline(always)]
    fn cpu_clock(&mut self) -> u8 {
        self.cpu.clock()
    }

    #[inline(always)]
    fn ppu_clock(&mut self, cycles: u16) {
        self.ppu().clock(cycles);
    }

    #[inline(always)]
    fn apu_clock(&mut self, cycles: u16) {
        self.apu().clock(cycles);
    }

    #[inline(always)]
    fn dma_clock(&mut self, cycles: u16) {
        self.mmu().clock_dma(cycles);
    }

    #[inline(always)]
    fn timer_clock(&mut self, cycles: u16) {
        self.timer().clock(cycles);
    }

    #[inline(always)]
    fn serial_clock(&mut self, cycles: u16) {
        self.serial().clock(cycles);
    }

    pub fn ppu_ly(&mut self) -> u8 {
        self.ppu().ly()
    }

    pub fn ppu_mode(&mut self) -> PpuMode {
        self.ppu().mode()
    }

    /// Runs a single CPU instruction (servicing interrupts and the
    /// HALT state as needed) and clocks every enabled peripheral by
    /// the number of cycles it took, in the fixed DMA, PPU, timer,
    /// APU, serial order.
    pub fn clock(&mut self) -> u16 {
        let cycles = self.cpu_clock() as u16;
        self.update_cycles(cycles);
        cycles
    }

    /// Runs instructions until at least `count` cycles have elapsed,
    /// returning the actual number of cycles run (which may overshoot
    /// `count` since instructions are not interruptible).
    pub fn clock_many(&mut self, count: u16) -> u16 {
        let mut cycles = 0u16;
        while cycles < count {
            cycles += self.clock();
        }
        cycles
    }

    /// Runs instructions until the CPU's program counter equals `addr`,
    /// returning the number of cycles elapsed.
    pub fn clock_step(&mut self, addr: u16) -> u16 {
        let mut cycles = 0u16;
        loop {
            cycles += self.clock();
            if self.cpu.pc() == addr {
                break;
            }
        }
        cycles
    }

    pub fn clocks(&mut self, count: usize) -> u64 {
        let mut cycles = 0u64;
        for _ in 0..count {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Runs instructions until at least `limit` cycles have elapsed,
    /// in terms of total (64-bit) cycle count.
    pub fn clocks_cycles(&mut self, limit: u64) -> u64 {
        let mut cycles = 0u64;
        while cycles < limit {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Runs instructions until at least `limit` cycles have elapsed,
    /// eagerly collecting the frame buffer whenever a new frame
    /// becomes available along the way.
    pub fn clocks_frame_buffer(&mut self, limit: u64) -> ClockFrame {
        let mut cycles = 0u64;
        let mut frames = 0u32;
        let mut frame_buffer = None;
        while cycles < limit {
            cycles += self.clock() as u64;
            if self.ppu().new_frame() {
                frames += 1;
                frame_buffer = Some(self.ppu().frame_buffer().to_vec());
            }
        }
        ClockFrame {
            cycles,
            frames,
            frame_buffer,
        }
    }

    /// Runs instructions until a new PPU frame has been completed,
    /// returning the number of cycles it took.
    pub fn next_frame(&mut self) -> u32 {
        let mut cycles = 0u32;
        loop {
            cycles += self.clock() as u32;
            if self.ppu().new_frame() {
                break;
            }
        }
        cycles
    }

    /// Runs instructions until the program counter reaches `addr`,
    /// returning the number of cycles it took.
    pub fn step_to(&mut self, addr: u16) -> u32 {
        let mut cycles = 0u32;
        loop {
            cycles += self.clock() as u32;
            if self.cpu.pc() == addr {
                break;
            }
        }
        cycles
    }

    /// Runs the emulator until either a new frame is produced or the
    /// audio buffer has filled up to `max_samples`, whichever comes
    /// first, returning an event bitmask ([`EVENT_NEW_FRAME`] /
    /// [`EVENT_SOUND_BUFFER_FULL`]) describing what happened.
    ///
    /// Clears both edges on entry, so a caller that ignores one of the
    /// two events will not see it fire again on the next call just
    /// because it was never consumed.
    pub fn run_until_event(&mut self, max_samples: usize) -> u8 {
        self.ppu().new_frame();
        self.apu().clear_audio_buffer();

        let mut event = 0u8;
        loop {
            self.clock();

            if self.ppu().new_frame() {
                event |= EVENT_NEW_FRAME;
            }
            if self.apu_i().audio_buffer().len() >= max_samples {
                event |= EVENT_SOUND_BUFFER_FULL;
            }
            if event != 0 {
                break;
            }
        }
        event
    }

    pub fn vram_eager(&mut self) -> Vec<u8> {
        self.ppu().vram().to_vec()
    }

    pub fn hram_eager(&mut self) -> Vec<u8> {
        self.ppu().hram().to_vec()
    }

    pub fn frame_buffer_eager(&mut self) -> Vec<u8> {
        self.ppu().frame_buffer().to_vec()
    }

    pub fn audio_buffer_eager(&mut self, clear: bool) -> Vec<u8> {
        let buffer = self.apu().audio_buffer().iter().copied().collect();
        if clear {
            self.apu().clear_audio_buffer();
        }
        buffer
    }

    pub fn audio_output(&mut self) -> u8 {
        self.apu().output()
    }

    pub fn audio_all_output(&mut self) -> [u8; 4] {
        [
            self.apu().ch1_output(),
            self.apu().ch2_output(),
            self.apu().ch3_output(),
            self.apu().ch4_output(),
        ]
    }

    pub fn audio_ch1_output(&mut self) -> u8 {
        self.apu().ch1_output()
    }

    pub fn audio_ch2_output(&mut self) -> u8 {
        self.apu().ch2_output()
    }

    pub fn audio_ch3_output(&mut self) -> u8 {
        self.apu().ch3_output()
    }

    pub fn audio_ch4_output(&mut self) -> u8 {
        self.apu().ch4_output()
    }

    pub fn audio_ch1_enabled(&mut self) -> bool {
        self.apu_i().ch1_out_enabled()
    }

    pub fn set_audio_ch1_enabled(&mut self, value: bool) {
        self.apu().set_ch1_out_enabled(value);
    }

    pub fn audio_ch2_enabled(&mut self) -> bool {
        self.apu_i().ch2_out_enabled()
    }

    pub fn set_audio_ch2_enabled(&mut self, value: bool) {
        self.apu().set_ch2_out_enabled(value);
    }

    pub fn audio_ch3_enabled(&mut self) -> bool {
        self.apu_i().ch3_out_enabled()
    }

    pub fn set_audio_ch3_enabled(&mut self, value: bool) {
        self.apu().set_ch3_out_enabled(value);
    }

    pub fn audio_ch4_enabled(&mut self) -> bool {
        self.apu_i().ch4_out_enabled()
    }

    pub fn set_audio_ch4_enabled(&mut self, value: bool) {
        self.apu().set_ch4_out_enabled(value);
    }

    pub fn audio_sampling_rate(&mut self) -> u16 {
        self.apu().sampling_rate()
    }

    pub fn audio_channels(&mut self) -> u8 {
        self.apu().channels()
    }

    pub fn cartridge_eager(&mut self) -> Cartridge {
        self.rom().clone()
    }

    pub fn ram_data_eager(&mut self) -> Vec<u8> {
        self.rom().ram_data_eager()
    }

    pub fn set_ram_data(&mut self, data: &[u8]) {
        self.rom().set_ram_data(data);
    }

    /// Snapshot of the most relevant CPU and PPU registers.
    pub fn registers(&mut self) -> Registers {
        let ppu_registers = self.ppu().registers();
        Registers {
            pc: self.cpu.pc(),
            sp: self.cpu.sp(),
            a: (self.cpu.af() >> 8) as u8,
            b: (self.cpu.bc() >> 8) as u8,
            c: (self.cpu.bc() & 0x00ff) as u8,
            d: (self.cpu.de() >> 8) as u8,
            e: (self.cpu.de() & 0x00ff) as u8,
            h: (self.cpu.hl() >> 8) as u8,
            l: (self.cpu.hl() & 0x00ff) as u8,
            scy: ppu_registers.scy,
            scx: ppu_registers.scx,
            wy: ppu_registers.wy,
            wx: ppu_registers.wx,
            ly: ppu_registers.ly,
            lyc: ppu_registers.lyc,
        }
    }

    pub fn ppu_enabled(&self) -> bool {
        self.ppu_enabled
    }

    pub fn set_ppu_enabled(&mut self, value: bool) {
        self.ppu_enabled = value;
        self.gbc.lock().unwrap().ppu_enabled = value;
    }

    pub fn apu_enabled(&self) -> bool {
        self.apu_enabled
    }

    pub fn set_apu_enabled(&mut self, value: bool) {
        self.apu_enabled = value;
        self.gbc.lock().unwrap().apu_enabled = value;
    }

    pub fn dma_enabled(&self) -> bool {
        self.dma_enabled
    }

    pub fn set_dma_enabled(&mut self, value: bool) {
        self.dma_enabled = value;
        self.gbc.lock().unwrap().dma_enabled = value;
    }

    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    pub fn set_timer_enabled(&mut self, value: bool) {
        self.timer_enabled = value;
        self.gbc.lock().unwrap().timer_enabled = value;
    }

    pub fn serial_enabled(&self) -> bool {
        self.serial_enabled
    }

    pub fn set_serial_enabled(&mut self, value: bool) {
        self.serial_enabled = value;
        self.gbc.lock().unwrap().serial_enabled = value;
    }

    pub fn set_all_enabled(&mut self, value: bool) {
        self.set_ppu_enabled(value);
        self.set_apu_enabled(value);
        self.set_dma_enabled(value);
        self.set_timer_enabled(value);
        self.set_serial_enabled(value);
    }

    pub fn clock_freq(&self) -> u32 {
        self.clock_freq
    }

    pub fn set_clock_freq(&mut self, value: u32) {
        self.clock_freq = value;
        self.gbc.lock().unwrap().clock_freq = value;
        self.apu().set_clock_freq(value);
    }

    pub fn clock_freq_s(&self) -> String {
        match self.clock_freq {
            Self::CPU_FREQ => String::from("Normal"),
            _ => format!("{} Hz", self.clock_freq),
        }
    }

    pub fn attach_null_serial(&mut self) {
        self.attach_serial(Box::<NullDevice>::default());
    }

    pub fn display_width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn display_height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn ram_size(&self) -> RamSize {
        self.rom_i().ram_size()
    }

    pub fn vram_size(&self) -> usize {
        crate::ppu::VRAM_SIZE
    }

    /// Human readable, multi-line summary of the current engine
    /// configuration, used by front-ends for an "about" style panel.
    pub fn description(&self, column_length: usize) -> String {
        format!(
            "{:width$} {}\n{:width$} {}\n{:width$} {}",
            "Engine:",
            Info::version(),
            "Clock freq:",
            self.clock_freq_s(),
            "RAM size:",
            self.ram_size().description(),
            width = column_length,
        )
    }

    /// Extended description, also used by the panic diagnostics
    /// dumper when the "pedantic" feature is enabled.
    pub fn description_debug(&self) -> String {
        format!(
            "{}\nPC: 0x{:04x}\nSP: 0x{:04x}\nROM: {}\n{}",
            self.description(12),
            self.cpu_i().pc(),
            self.cpu_i().sp(),
            self.rom_i().title(),
            self.dma_i().description(),
        )
    }
}

/// Accessor methods, kept in a separate `impl` block mirroring the
/// component layering of the emulator.
impl GameBoy {
    pub const CPU_FREQ: u32 = 4194304;
    pub const VISUAL_FREQ: f32 = 59.7275;
    pub const LCD_CYCLES: u32 = 70224;

    pub fn cpu(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn cpu_i(&self) -> &Cpu {
        &self.cpu
    }

    pub fn mmu(&mut self) -> &mut Mmu {
        self.cpu.mmu()
    }

    pub fn mmu_i(&self) -> &Mmu {
        self.cpu.mmu_i()
    }

    pub fn ppu(&mut self) -> &mut Ppu {
        self.cpu.ppu()
    }

    pub fn ppu_i(&self) -> &Ppu {
        self.cpu.ppu_i()
    }

    pub fn apu(&mut self) -> &mut Apu {
        self.cpu.apu()
    }

    pub fn apu_i(&self) -> &Apu {
        self.cpu.apu_i()
    }

    pub fn dma(&mut self) -> &mut Dma {
        self.cpu.dma()
    }

    pub fn dma_i(&self) -> &Dma {
        self.cpu.dma_i()
    }

    pub fn pad(&mut self) -> &mut Pad {
        self.cpu.pad()
    }

    pub fn pad_i(&self) -> &Pad {
        self.cpu.pad_i()
    }

    pub fn timer(&mut self) -> &mut Timer {
        self.cpu.timer()
    }

    pub fn timer_i(&self) -> &Timer {
        self.cpu.timer_i()
    }

    pub fn serial(&mut self) -> &mut Serial {
        self.cpu.serial()
    }

    pub fn serial_i(&self) -> &Serial {
        self.cpu.serial_i()
    }

    pub fn rom(&mut self) -> &mut Cartridge {
        self.mmu().rom()
    }

    pub fn rom_i(&self) -> &Cartridge {
        self.mmu_i().rom_i()
    }

    pub fn cartridge(&mut self) -> &mut Cartridge {
        self.rom()
    }

    pub fn cartridge_i(&self) -> &Cartridge {
        self.rom_i()
    }

    pub fn frame_buffer(&mut self) -> &[u8] {
        self.ppu().frame_buffer()
    }

    pub fn audio_buffer(&mut self) -> &std::collections::VecDeque<u8> {
        self.apu().audio_buffer()
    }

    /// Loads an already parsed cartridge into the emulator and resets
    /// the machine back to power-on (post-boot) state.
    pub fn load_cartridge(&mut self, rom: Cartridge) {
        self.mmu().set_rom(rom);
        self.boot();
    }

    /// Loads a cartridge from raw ROM bytes (and, optionally, a save
    /// file's raw bytes) and resets the machine to power-on state.
    pub fn load_rom(&mut self, data: &[u8], ram_data: Option<&[u8]>) -> Result<(), Error> {
        let mut rom = Cartridge::from_data(data)?;
        if let Some(ram_data) = ram_data {
            rom.set_ram_data(ram_data);
        }
        self.load_cartridge(rom);
        Ok(())
    }

    /// Loads a cartridge from a file on disk, optionally loading a
    /// companion save file as well.
    pub fn load_rom_file(&mut self, path: &str, ram_path: Option<&str>) -> Result<(), Error> {
        let data = read_file(path)?;
        let ram_data = match ram_path {
            Some(ram_path) => Some(read_file(ram_path)?),
            None => None,
        };
        self.load_rom(&data, ram_data.as_deref())
    }

    /// Loads an empty cartridge, used mostly for testing purposes.
    pub fn load_rom_empty(&mut self) {
        self.load_cartridge(Cartridge::new());
    }

    pub fn attach_serial(&mut self, device: Box<dyn SerialDevice>) {
        self.serial().set_device(device);
    }

    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.mmu().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.mmu().write(addr, value);
    }
}

impl AudioProvider for GameBoy {
    fn audio_output(&self) -> u8 {
        self.apu_i().output()
    }

    fn audio_buffer(&self) -> &std::collections::VecDeque<u8> {
        self.apu_i().audio_buffer()
    }

    fn clear_audio_buffer(&mut self) {
        self.apu().clear_audio_buffer();
    }
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameBoy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description(9))
    }
}
