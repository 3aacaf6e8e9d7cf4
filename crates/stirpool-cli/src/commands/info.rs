use stirpool_core::{HASHINPUT, HASHSIZE, NoiseSource, POOLSIZE, SEED_LEN, SystemNoise, TimerNoise};

pub fn run() {
    println!("stirpool {}", stirpool_core::VERSION);
    println!();
    println!("pool size:    {POOLSIZE} bytes");
    println!("digest size:  {HASHSIZE} bytes");
    println!("hash block:   {HASHINPUT} bytes");
    println!("seed blob:    {SEED_LEN} bytes");
    println!();
    println!("built-in noise sources:");
    println!(
        "  {:<18} light — sampled on every stir",
        TimerNoise::new().name()
    );
    println!(
        "  {:<18} heavy — sampled once at activation",
        SystemNoise::new().name()
    );
}
