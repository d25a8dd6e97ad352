//! Line-oriented session over a ParkingService

use std::io::{BufRead, Write};
use std::rc::Rc;

use chrono::Duration;
use log::debug;

use parking_app::app::ParkingService;
use parking_domain::{Clock, ManualClock};
use parking_types::{format_timestamp, Error, Lot, Result};

use crate::output::Printer;

const HELP: &str = "\
Commands:
  rate <amount>               set charges per hour
  spaces <count>              set number of parking spaces
  add <name> <plate> <lot>    park a car (quote names with spaces)
  remove <plate>              remove a car and bill it
  lots                        list free lots
  cars                        list parked cars
  details                     show the last removed car
  status                      show rate, spaces and free lots
  advance <minutes>           move the manual clock forward
  help                        show this help
  quit                        leave the session";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Rate(String),
    Spaces(u32),
    Add {
        owner: String,
        plate: String,
        lot: Option<Lot>,
    },
    Remove(String),
    Lots,
    Cars,
    Details,
    Status,
    Advance(i64),
    Help,
    Quit,
}

fn usage(text: &str) -> Error {
    Error::Command(format!("usage: {}", text))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Command(format!("{} must be a whole number, got {:?}", what, value)))
}

impl ShellCommand {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let words = shell_words::split(line)
            .map_err(|e| Error::Command(format!("cannot parse {:?}: {}", line, e)))?;
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (name.to_lowercase().as_str(), args) {
            ("rate", [rate]) => ShellCommand::Rate(rate.clone()),
            ("rate", _) => return Err(usage("rate <amount>")),
            ("spaces", [count]) => ShellCommand::Spaces(parse_number(count, "spaces")?),
            ("spaces", _) => return Err(usage("spaces <count>")),
            ("add", args) if args.len() <= 3 => {
                let lot = match args.get(2) {
                    Some(lot) => Some(parse_number(lot, "lot")?),
                    None => None,
                };
                ShellCommand::Add {
                    owner: args.first().cloned().unwrap_or_default(),
                    plate: args.get(1).cloned().unwrap_or_default(),
                    lot,
                }
            }
            ("add", _) => return Err(usage("add <name> <plate> <lot>")),
            ("remove", [plate]) => ShellCommand::Remove(plate.clone()),
            ("remove", _) => return Err(usage("remove <plate>")),
            ("lots", []) => ShellCommand::Lots,
            ("cars", []) => ShellCommand::Cars,
            ("details", []) => ShellCommand::Details,
            ("status", []) => ShellCommand::Status,
            ("advance", [minutes]) => ShellCommand::Advance(parse_number(minutes, "minutes")?),
            ("advance", _) => return Err(usage("advance <minutes>")),
            ("help", _) => ShellCommand::Help,
            ("quit", _) | ("exit", _) => ShellCommand::Quit,
            (other, _) => {
                return Err(Error::Command(format!(
                    "unknown command {:?} (try \"help\")",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

/// Whether the session keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// How lines are fed to the shell
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Print a prompt before each line
    pub prompt: bool,
    /// Return the first failing command as an error
    pub stop_on_error: bool,
}

pub struct Shell<W: Write> {
    service: ParkingService,
    manual_clock: Option<Rc<ManualClock>>,
    printer: Printer,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(
        service: ParkingService,
        manual_clock: Option<Rc<ManualClock>>,
        printer: Printer,
        out: W,
    ) -> Self {
        Self {
            service,
            manual_clock,
            printer,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        debug!("shell command {:?}", command);
        match command {
            ShellCommand::Rate(rate) => {
                self.service.set_hourly_rate_str(&rate)?;
                self.printer.status(&mut self.out, &self.service.snapshot())?;
            }
            ShellCommand::Spaces(count) => {
                self.service.set_total_spaces(count)?;
                self.printer.status(&mut self.out, &self.service.snapshot())?;
            }
            ShellCommand::Add { owner, plate, lot } => {
                let entry = self.service.add_car(&owner, &plate, lot)?;
                self.printer.car_added(&mut self.out, &entry)?;
            }
            ShellCommand::Remove(plate) => {
                let record = self.service.remove_car(&plate)?;
                self.printer.details(&mut self.out, Some(&record))?;
            }
            ShellCommand::Lots => self.printer.free_lots(&mut self.out, self.service.free_lots())?,
            ShellCommand::Cars => self.printer.cars(&mut self.out, self.service.active_cars())?,
            ShellCommand::Details => self
                .printer
                .details(&mut self.out, self.service.last_billing_record())?,
            ShellCommand::Status => self.printer.status(&mut self.out, &self.service.snapshot())?,
            ShellCommand::Advance(minutes) => {
                let clock = self.manual_clock.as_ref().ok_or_else(|| {
                    Error::Command("advance needs the manual clock (--manual-clock)".to_string())
                })?;
                if minutes < 0 {
                    return Err(Error::Command("cannot move the clock backwards".to_string()));
                }
                let step = Duration::try_minutes(minutes)
                    .ok_or_else(|| Error::Command(format!("cannot advance by {} minutes", minutes)))?;
                if !clock.advance(step) {
                    return Err(Error::Command(format!(
                        "advancing by {} minutes leaves the supported date range",
                        minutes
                    )));
                }
                writeln!(self.out, "Clock: {}", format_timestamp(&clock.now()))?;
            }
            ShellCommand::Help => writeln!(self.out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        match ShellCommand::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Flow::Continue),
        }
    }

    /// Feed every line of `input` to the shell until it ends or `quit`
    pub fn run<R: BufRead>(&mut self, input: R, options: RunOptions) -> Result<()> {
        let mut lines = input.lines();
        let mut line_no = 0;
        loop {
            if options.prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            line_no += 1;

            match self.execute_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) if options.stop_on_error => {
                    return Err(Error::Command(format!("line {}: {}", line_no, e)));
                }
                Err(e) => eprintln!("Error: {}", e),
            }
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use parking_types::{OutputFormat, ParkingError};

    fn shell() -> Shell<Vec<u8>> {
        let clock = Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap(),
        ));
        let service = ParkingService::with_clock(Box::new(Rc::clone(&clock)));
        Shell::new(
            service,
            Some(clock),
            Printer::new(OutputFormat::Table, "₹"),
            Vec::new(),
        )
    }

    fn output(shell: Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_parse_add_with_quoted_name() {
        let cmd = ShellCommand::parse(r#"add "Mary Ann" KA-01 2"#).unwrap();
        assert_eq!(
            cmd,
            Some(ShellCommand::Add {
                owner: "Mary Ann".to_string(),
                plate: "KA-01".to_string(),
                lot: Some(2),
            })
        );
    }

    #[test]
    fn test_parse_add_without_lot() {
        let cmd = ShellCommand::parse("add Bob KA02").unwrap();
        assert_eq!(
            cmd,
            Some(ShellCommand::Add {
                owner: "Bob".to_string(),
                plate: "KA02".to_string(),
                lot: None,
            })
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert_eq!(ShellCommand::parse("# morning shift").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShellCommand::parse("spaces many").is_err());
        assert!(ShellCommand::parse("remove").is_err());
        assert!(ShellCommand::parse("add a b 1 extra").is_err());
        assert!(ShellCommand::parse("fly").is_err());
        assert!(ShellCommand::parse("add \"unterminated").is_err());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ShellCommand::parse("LOTS").unwrap(), Some(ShellCommand::Lots));
        assert_eq!(ShellCommand::parse("Exit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_session_bills_removed_car() {
        let mut shell = shell();
        for line in ["rate 10", "spaces 3", "add Alice KA01 1", "advance 90", "remove KA01"] {
            shell.execute_line(line).unwrap();
        }
        assert_eq!(shell.service.free_lots(), &[1, 2, 3]);
        let text = output(shell);
        assert!(text.contains("Parked KA01 (Alice) in lot 1"));
        assert!(text.contains("Duration Parked: 1.50 hours"));
        assert!(text.contains("Total Charges:   ₹15"));
    }

    #[test]
    fn test_missing_field_is_invalid_input() {
        let mut shell = shell();
        shell.execute_line("spaces 2").unwrap();
        let err = shell.execute_line("add Bob KA02").unwrap_err();
        assert!(matches!(err, Error::Parking(ParkingError::InvalidInput(_))));
        assert!(shell.service.active_cars().is_empty());
    }

    #[test]
    fn test_advance_past_range_is_an_error() {
        let mut shell = shell();
        shell.execute_line("spaces 1").unwrap();
        shell.execute_line("add Alice KA01 1").unwrap();

        for line in ["advance 9223372036854775807", "advance 1000000000000"] {
            let err = shell.execute_line(line).unwrap_err();
            assert!(matches!(err, Error::Command(_)), "{}: {:?}", line, err);
        }

        shell.execute_line("advance 60").unwrap();
        shell.execute_line("rate 2").unwrap();
        let record = shell.service.remove_car("KA01").unwrap();
        assert_eq!(record.cost, 2);
    }

    #[test]
    fn test_advance_without_manual_clock() {
        let mut shell = Shell::new(
            ParkingService::new(),
            None,
            Printer::new(OutputFormat::Table, "₹"),
            Vec::new(),
        );
        assert!(shell.execute_line("advance 5").is_err());
    }

    #[test]
    fn test_run_continues_after_errors() {
        let mut shell = shell();
        let script = "spaces 2\nremove NOPE\nadd Alice KA01 1\nquit\nadd Bob KA02 2\n";
        shell
            .run(
                script.as_bytes(),
                RunOptions {
                    prompt: false,
                    stop_on_error: false,
                },
            )
            .unwrap();
        assert_eq!(shell.service.active_cars().len(), 1);
        assert_eq!(shell.service.free_lots(), &[2]);
    }

    #[test]
    fn test_run_stops_on_error() {
        let mut shell = shell();
        let script = "spaces 2\nadd Alice KA01 1\nadd Bob KA01 2\nadd Carol KA03 2\n";
        let err = shell
            .run(
                script.as_bytes(),
                RunOptions {
                    prompt: false,
                    stop_on_error: true,
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("line 3"));
        assert_eq!(shell.service.active_cars().len(), 1);
    }
}
