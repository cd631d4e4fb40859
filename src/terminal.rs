use calcpad::{DisplayBuffer, Key};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

const QUIT_WORDS: &[&str] = &["quit", "exit"];

/// Turns one input line into key presses. A line holding a single keypad
/// label (`AC`, `DEL`, `=` ...) is that key; anything else is typed
/// character by character.
fn line_keys(line: &str) -> Vec<Result<Key, char>> {
    if let Some(key) = Key::from_label(line) {
        return vec![Ok(key)];
    }

    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Key::from_char(c).ok_or(c))
        .collect()
}

/// Runs the keypad until end of input or a quit word, printing the display
/// after every line.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    buffer: &mut DisplayBuffer,
) -> io::Result<()> {
    writeln!(output, "{}", buffer.text())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if QUIT_WORDS.contains(&line) {
            break;
        }

        for key in line_keys(line) {
            match key {
                Ok(key) => {
                    // Failures are already on the display as the marker.
                    if let Err(err) = buffer.press(key) {
                        debug!(%err, ?key, "key press failed");
                    }
                }
                Err(c) => warn!(key = %c, "no keypad key for input"),
            }
        }

        writeln!(output, "{}", buffer.text())?;
    }

    Ok(())
}
