use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x based on target
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv6m") {
        // Pico 1 (RP2040): copy memory-pico1.x to OUT_DIR as memory.x
        let memory_x = fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory-pico1.x");
    }

    // 2) Load optional env files
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) Display brightness: 0 (dark) to 255 (full on-time), default 255
    let brightness_text = env_or_default("DISPLAY_BRIGHTNESS", "255");
    let brightness = brightness_text.trim().parse::<u8>().unwrap_or_else(|_| {
        println!(
            "cargo:warning=DISPLAY_BRIGHTNESS={brightness_text} is not in 0..=255; using 255"
        );
        u8::MAX
    });

    // 4) Expose as compile-time constants
    let config = format!(
        "/// Initial display brightness, from `DISPLAY_BRIGHTNESS` at build time.\n\
         pub const DEFAULT_BRIGHTNESS: u8 = {brightness};\n"
    );
    fs::write(out_dir.join("display_config.rs"), config).expect("Failed to write display_config.rs");

    println!("cargo:rerun-if-env-changed=DISPLAY_BRIGHTNESS");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
