//! Build automation tasks for the mex-clock firmware.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The only board the firmware runs on.
const TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1,arm";
const HOST_FEATURES: &str = "host";
const DEFAULT_EXAMPLE: &str = "mex_clock";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the mex-clock firmware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: build lib and firmware, run host tests, generate docs
    CheckAll,
    /// Build the library for the Pico
    Build,
    /// Run unit and integration tests on the host
    Test,
    /// Build the firmware example
    Example {
        #[arg(default_value = DEFAULT_EXAMPLE)]
        name: String,
    },
    /// Build a UF2 firmware file for flashing to the Pico
    Uf2 {
        #[arg(default_value = DEFAULT_EXAMPLE)]
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build => report(build_lib(), "Build successful! ✨"),
        Commands::Test => report(host_tests(), "Tests passed! ✨"),
        Commands::Example { name } => report(build_example(&name, false), "Build successful! ✨"),
        Commands::Uf2 { name } => build_uf2(&name),
    }
}

fn check_all() -> ExitCode {
    println!("{}", "==> Building library...".cyan());
    if !build_lib() {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building firmware...".cyan());
    println!("  {}", format!("- {DEFAULT_EXAMPLE}").bright_black());
    if !build_example(DEFAULT_EXAMPLE, false) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running host tests...".cyan());
    if !host_tests() {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(cargo().args([
        "doc",
        "--target",
        TARGET,
        "--no-deps",
        "--features",
        FIRMWARE_FEATURES,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    ExitCode::SUCCESS
}

fn build_lib() -> bool {
    println!(
        "{}",
        format!("Building library with features: {FIRMWARE_FEATURES}").cyan()
    );
    run_command(cargo().args([
        "build",
        "--lib",
        "--target",
        TARGET,
        "--features",
        FIRMWARE_FEATURES,
        "--no-default-features",
    ]))
}

fn build_example(name: &str, release: bool) -> bool {
    println!(
        "{}",
        format!("Building example '{name}' with features: {FIRMWARE_FEATURES}").cyan()
    );
    let mut cmd = cargo();
    cmd.args(["build", "--example", name]);
    if release {
        cmd.arg("--release");
    }
    run_command(cmd.args([
        "--target",
        TARGET,
        "--features",
        FIRMWARE_FEATURES,
        "--no-default-features",
    ]))
}

fn host_tests() -> bool {
    let mut cmd = cargo();
    cmd.arg("test");
    match host_target() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
            cmd.arg("--target").arg(target);
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }
    run_command(cmd.args([
        "--lib",
        "--tests",
        "--no-default-features",
        "--features",
        HOST_FEATURES,
    ]))
}

fn build_uf2(name: &str) -> ExitCode {
    println!(
        "{}",
        format!("Building UF2 for example '{name}' (pico1/arm)").cyan()
    );
    println!("  Target: {}", TARGET.bright_black());

    if !build_example(name, true) {
        return ExitCode::FAILURE;
    }

    let elf_path = format!("target/{TARGET}/release/examples/{name}");
    let uf2_path = format!("{name}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(Command::new("elf2uf2-rs").args([&elf_path, &uf2_path])) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn report(ok: bool, message: &str) -> ExitCode {
    if ok {
        println!("{}", message.green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// Runs from the workspace root via the `cargo xtask` alias.
fn cargo() -> Command {
    Command::new("cargo")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
