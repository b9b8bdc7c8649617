//! # Grocer Shell Entry Point
//!
//! The actual setup is in lib.rs so the read loop can be tested.

fn main() {
    if let Err(e) = grocer_shell::run() {
        eprintln!("grocer-shell: {}", e);
        std::process::exit(1);
    }
}
