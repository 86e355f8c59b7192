//! Line-based console shell.
//!
//! Reads commands from stdin so the timer can be driven on platforms without
//! a native tray, and alongside the tray everywhere else.

use std::io::BufRead;
use std::thread;

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::session::Intent;

/// Help text printed for `help` and unknown commands.
pub const CONSOLE_HELP: &str = "commands: click | focus | break | long | stop | sound | settings | web | quit";

/// A parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Intent(Intent),
    Help,
    Unknown,
    Empty,
}

/// Parses one line of console input.
pub fn parse_command(line: &str) -> ConsoleCommand {
    let word = line.trim().to_ascii_lowercase();
    let intent = match word.as_str() {
        "" => return ConsoleCommand::Empty,
        "help" | "?" => return ConsoleCommand::Help,
        "click" => Intent::Toggle,
        "pomodoro" => Intent::StartFocus,
        "exit" => Intent::Quit,
        name => match Intent::ALL.into_iter().find(|intent| intent.as_str() == name) {
            Some(intent) => intent,
            None => return ConsoleCommand::Unknown,
        },
    };
    ConsoleCommand::Intent(intent)
}

/// Forwards intents read from `input` until end of input or a closed channel.
///
/// End of input is not treated as a quit request.
pub fn forward_lines<R: BufRead>(input: R, intents: &Sender<Intent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read console input: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            ConsoleCommand::Intent(intent) => {
                if intents.send(intent).is_err() {
                    break;
                }
            }
            ConsoleCommand::Help => println!("{}", CONSOLE_HELP),
            ConsoleCommand::Unknown => println!("unknown command '{}'; {}", line.trim(), CONSOLE_HELP),
            ConsoleCommand::Empty => {}
        }
    }
    debug!("Console input closed");
}

/// Spawns a thread that reads stdin and forwards intents.
pub fn spawn_stdin_reader(intents: Sender<Intent>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("console".to_string())
        .spawn(move || forward_lines(std::io::stdin().lock(), &intents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::io::Cursor;

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_command("click"), ConsoleCommand::Intent(Intent::Toggle));
        assert_eq!(parse_command("toggle"), ConsoleCommand::Intent(Intent::Toggle));
        assert_eq!(parse_command("focus"), ConsoleCommand::Intent(Intent::StartFocus));
        assert_eq!(parse_command("break"), ConsoleCommand::Intent(Intent::StartBreak));
        assert_eq!(parse_command("long"), ConsoleCommand::Intent(Intent::StartLongBreak));
        assert_eq!(parse_command("stop"), ConsoleCommand::Intent(Intent::Stop));
        assert_eq!(parse_command("sound"), ConsoleCommand::Intent(Intent::ToggleSound));
        assert_eq!(parse_command("settings"), ConsoleCommand::Intent(Intent::EditSettings));
        assert_eq!(parse_command("web"), ConsoleCommand::Intent(Intent::OpenWebsite));
        assert_eq!(parse_command("quit"), ConsoleCommand::Intent(Intent::Quit));
    }

    #[test]
    fn test_every_intent_name_parses() {
        for intent in Intent::ALL {
            assert_eq!(parse_command(intent.as_str()), ConsoleCommand::Intent(intent));
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(parse_command("  Focus \n"), ConsoleCommand::Intent(Intent::StartFocus));
        assert_eq!(parse_command("EXIT"), ConsoleCommand::Intent(Intent::Quit));
        assert_eq!(parse_command(""), ConsoleCommand::Empty);
        assert_eq!(parse_command("?"), ConsoleCommand::Help);
        assert_eq!(parse_command("dance"), ConsoleCommand::Unknown);
    }

    #[test]
    fn test_forward_lines() {
        let (tx, rx) = unbounded();
        forward_lines(Cursor::new("focus\n\nnope\nstop\nquit\n"), &tx);

        let intents: Vec<_> = rx.try_iter().collect();
        assert_eq!(intents, vec![Intent::StartFocus, Intent::Stop, Intent::Quit]);
    }

    #[test]
    fn test_forward_stops_when_receiver_dropped() {
        let (tx, rx) = unbounded();
        drop(rx);
        // must return rather than loop forever
        forward_lines(Cursor::new("focus\nstop\n"), &tx);
    }
}
