use std::io::{self, Write};

use colored::Colorize;

use ht_narrator::{HttpNarrator, Narrator, NarratorConfig, Prompt};

const GREETING: &str = "Hello! Can you roleplay as a fantasy dungeon master? Just say yes or no.";

pub fn run(config: NarratorConfig) -> Result<(), String> {
    let mut narrator =
        HttpNarrator::new(config).map_err(|e| format!("failed to set up narrator: {e}"))?;
    println!(
        "  {} {} at {}",
        "Pinging".bold(),
        narrator.config().model,
        narrator.config().endpoint()
    );

    let reply = greet(&mut narrator, &mut io::stdout())?;
    println!();
    println!("  {} ({} chars)", "Narrator is up".green(), reply.len());
    Ok(())
}

/// Send the greeting, echoing the reply to `out` as it arrives.
fn greet<N: Narrator, W: Write>(narrator: &mut N, out: &mut W) -> Result<String, String> {
    let prompt = Prompt::new(ht_play::prompt::SYSTEM_PROMPT, GREETING);
    let mut write_error = None;
    let result = narrator.narrate(&prompt, &mut |text| {
        if let Err(e) = write!(out, "{text}").and_then(|()| out.flush()) {
            write_error.get_or_insert(e);
        }
    });
    if let Some(e) = write_error {
        return Err(format!("failed to print reply: {e}"));
    }
    result.map_err(|e| format!("narrator unreachable: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_narrator::{NarratorError, NarratorResult};

    struct Canned(Option<&'static str>);

    impl Narrator for Canned {
        fn narrate(
            &mut self,
            _prompt: &Prompt,
            on_text: &mut dyn FnMut(&str),
        ) -> NarratorResult<String> {
            let text = self.0.ok_or(NarratorError::EmptyResponse)?;
            on_text(text);
            Ok(text.to_string())
        }
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn greet_echoes_reply() {
        let mut out = Vec::new();
        let reply = greet(&mut Canned(Some("Yes.")), &mut out).unwrap();
        assert_eq!(reply, "Yes.");
        assert_eq!(out, b"Yes.");
    }

    #[test]
    fn greet_reports_write_failure() {
        let err = greet(&mut Canned(Some("Yes.")), &mut ClosedPipe).unwrap_err();
        assert!(err.contains("failed to print reply"), "{err}");
    }

    #[test]
    fn greet_reports_narrator_failure() {
        let err = greet(&mut Canned(None), &mut Vec::new()).unwrap_err();
        assert!(err.starts_with("narrator unreachable"), "{err}");
    }
}
