//! Terminal prompts

use std::io::{self, BufRead, Write};

use booking_client::Confirm;

/// Asks `[y/N]` on the terminal; anything but y/yes declines
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match ask(&format!("{} [y/N] ", prompt)) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Print `prompt` and read one line from stdin
pub fn ask(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Use the flag value, or ask for it
pub fn password_or_ask(password: Option<String>) -> io::Result<String> {
    match password {
        Some(p) => Ok(p),
        None => ask("Password: "),
    }
}
