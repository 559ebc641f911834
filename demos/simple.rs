use boytacean::gb::GameBoy;

fn main() {
    let mut game_boy = GameBoy::new();
    game_boy.load_rom_empty();
    let cycles = game_boy.step_to(0x0100);
    println!("Ran {} cycles", cycles);
}
