//! Terminal stand-in for the dialogue box and interact prompt
//!
//! Letters are written as they are revealed, styled with terminal
//! attributes.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};

use vignette_game::{DialoguePhase, DialogueView, PromptChange, TagSet, TextStyle};

/// Writes dialogue to any `Write` sink
pub struct TerminalPresenter<W: Write> {
    out: W,
    /// Emit terminal styling
    pub styled: bool,
    /// Message being printed, if any
    message: Option<usize>,
    /// Next plain-text index to print
    printed: usize,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            message: None,
            printed: 0,
        }
    }

    /// Announce who is speaking
    pub fn speaker(&mut self, name: &str) -> io::Result<()> {
        self.finish_line()?;
        writeln!(self.out, "-- {} --", name)
    }

    /// Show or withdraw the interact prompt
    pub fn prompt(&mut self, change: PromptChange) -> io::Result<()> {
        if change == PromptChange::Shown {
            self.finish_line()?;
            writeln!(self.out, "[SPACE]")?;
        }
        Ok(())
    }

    /// Print whatever the view reveals beyond what was already printed
    pub fn present(&mut self, view: &DialogueView<'_>) -> io::Result<()> {
        let live = !matches!(view.phase, DialoguePhase::Idle | DialoguePhase::Closed);
        if !live {
            return self.finish_line();
        }

        if self.message != Some(view.message_index) {
            self.finish_line()?;
            self.message = Some(view.message_index);
            self.printed = 0;
        }

        for letter in view.words.iter().flat_map(|w| &w.letters) {
            if !letter.shown || letter.index < self.printed {
                continue;
            }
            if letter.index > self.printed {
                queue!(self.out, Print(' '))?;
            }
            self.write_letter(letter.ch, letter.tags)?;
            self.printed = letter.index + 1;
        }
        self.out.flush()
    }

    /// End the line in progress, if any
    pub fn finish_line(&mut self) -> io::Result<()> {
        if self.message.take().is_some() {
            writeln!(self.out)?;
        }
        self.printed = 0;
        Ok(())
    }

    fn write_letter(&mut self, ch: char, tags: &TagSet) -> io::Result<()> {
        if !self.styled || tags.is_empty() {
            return queue!(self.out, Print(ch));
        }
        let mut styled = false;
        for style in tags.styles() {
            queue!(self.out, SetAttribute(attribute(style)))?;
            styled = true;
        }
        queue!(self.out, Print(ch))?;
        if styled {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn attribute(style: TextStyle) -> Attribute {
    match style {
        TextStyle::Bold => Attribute::Bold,
        TextStyle::Italic => Attribute::Italic,
        TextStyle::Wobble | TextStyle::ScalePulse => Attribute::SlowBlink,
        TextStyle::Bob => Attribute::Underlined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vignette_game::DialogueEngine;

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_prints_incrementally() {
        let mut engine = DialogueEngine::new();
        engine.open(vec!["Are you lost?".to_string(), "Yes.".to_string()]);
        let mut presenter = TerminalPresenter::new(Vec::new(), false);

        for _ in 0..100 {
            engine.update(Duration::from_millis(16));
            presenter.present(&engine.view()).unwrap();
        }
        engine.activate();
        engine.activate();
        presenter.present(&engine.view()).unwrap();
        engine.activate();
        engine.activate();
        engine.update(Duration::from_millis(16));
        presenter.present(&engine.view()).unwrap();

        assert_eq!(output(presenter), "Are you lost?\nYes.\n");
    }

    #[test]
    fn test_styles_letters() {
        let mut engine = DialogueEngine::new();
        engine.open(vec!["[b]No[/b]".to_string()]);
        engine.activate();
        let mut presenter = TerminalPresenter::new(Vec::new(), true);
        presenter.present(&engine.view()).unwrap();

        assert_eq!(output(presenter), "\x1b[1mN\x1b[0m\x1b[1mo\x1b[0m");

        // Unknown tags print plain
        let mut engine = DialogueEngine::new();
        engine.open(vec!["[q]x[/q]".to_string()]);
        engine.activate();
        let mut presenter = TerminalPresenter::new(Vec::new(), true);
        presenter.present(&engine.view()).unwrap();
        assert_eq!(output(presenter), "x");
    }

    #[test]
    fn test_prompt_and_speaker() {
        let mut presenter = TerminalPresenter::new(Vec::new(), false);
        presenter.prompt(PromptChange::Shown).unwrap();
        presenter.prompt(PromptChange::Hidden).unwrap();
        presenter.speaker("Elder").unwrap();
        assert_eq!(output(presenter), "[SPACE]\n-- Elder --\n");
    }
}
