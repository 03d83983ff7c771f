//! User-facing console lines with a short colored prefix.
//! Colors are enabled only when stdout is a TTY.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Ok,
}

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn prefixed(tone: Tone, msg: &str) -> String {
    let label = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Ok => "ok:",
    };
    if !is_tty() {
        return format!("{label} {msg}");
    }
    let colored = match tone {
        Tone::Info => label.cyan().bold().to_string(),
        Tone::Warn => label.yellow().bold().to_string(),
        Tone::Error => label.red().bold().to_string(),
        Tone::Ok => label.green().bold().to_string(),
    };
    format!("{colored} {msg}")
}

pub fn print_info(msg: &str) {
    println!("{}", prefixed(Tone::Info, msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", prefixed(Tone::Warn, msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", prefixed(Tone::Error, msg));
}

pub fn print_success(msg: &str) {
    println!("{}", prefixed(Tone::Ok, msg));
}
