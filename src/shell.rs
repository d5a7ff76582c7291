//! Interactive command shell.
//!
//! A thin dispatcher over the library: it owns the live [`Athlete`] session
//! and translates command lines into calls on the core. All printing
//! happens here; domain errors are reported and the loop continues.

use chrono::Local;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::activity::{ActivityKind, DateWindow};
use crate::athlete::{store, Athlete};
use crate::config::AppConfig;
use crate::garmin;
use crate::parse;

const HELP: &str = "\
Commands:
  load [file]                restore a session snapshot
  save [file]                save the session to a snapshot
  read [file]                import a Garmin activity CSV export
  add_goal exercise=<kind> metric=<m> timeframe=<t> target=<n>
  delete_goal exercise=<kind> metric=<m> timeframe=<t>
  show_goals [exercise]      list goals
  summarize_goals [exercise] report goal progress
  show_activities [exercise=<kind>] [start=YYYY-MM-DD] [end=YYYY-MM-DD]
  summarize_activities [exercise=<kind>] [start=YYYY-MM-DD] [end=YYYY-MM-DD]
  help                       show this list
  exit                       leave fitlog

Kinds: Cycle, Run, Tennis, Walk, Workout
Metrics: count, distance, duration    Timeframes: month, year, cumulative";

/// Interactive session state: one athlete, explicit and never global.
pub struct Shell {
    athlete: Athlete,
    config: AppConfig,
}

impl Shell {
    pub fn new(config: AppConfig) -> Self {
        Self {
            athlete: Athlete::new(),
            config,
        }
    }

    /// The live session aggregate.
    pub fn athlete(&self) -> &Athlete {
        &self.athlete
    }

    /// Run the command loop until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        writeln!(stdout, "Welcome to fitlog. Type help for a command list.")?;
        loop {
            write!(stdout, "fitlog: ")?;
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if !self.dispatch(line.trim()) {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command line. Returns `false` when the session ends.
    pub fn dispatch(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" | "?" => println!("{}", HELP),
            "exit" | "quit" => {
                println!("Thank you for using fitlog.");
                return false;
            }
            "load" => self.cmd_load(rest),
            "save" => self.cmd_save(rest),
            "read" => self.cmd_read(rest),
            "add_goal" => self.cmd_add_goal(rest),
            "delete_goal" => self.cmd_delete_goal(rest),
            "show_goals" => self.cmd_show_goals(rest),
            "summarize_goals" => self.cmd_summarize_goals(rest),
            "show_activities" => self.cmd_show_activities(rest),
            "summarize_activities" => self.cmd_summarize_activities(rest),
            other => println!("unknown command: {} (type help for a list)", other),
        }
        true
    }

    fn cmd_load(&mut self, arg: &str) {
        let file = default_if_empty(arg, &self.config.snapshot_file);
        // The session is only replaced on success; a failed load leaves
        // the current athlete untouched.
        match store::load(Path::new(file)) {
            Ok(athlete) => {
                println!(
                    "loaded {} activities and {} goals from {}",
                    athlete.activity_count(),
                    athlete.goal_count(),
                    file
                );
                self.athlete = athlete;
            }
            Err(err) => println!("load command failed: {}", err),
        }
    }

    fn cmd_save(&mut self, arg: &str) {
        let file = default_if_empty(arg, &self.config.snapshot_file);
        match store::save(&self.athlete, Path::new(file)) {
            Ok(()) => println!("saved session to {}", file),
            Err(err) => println!("save command failed: {}", err),
        }
    }

    fn cmd_read(&mut self, arg: &str) {
        let file = default_if_empty(arg, &self.config.activity_file);
        match garmin::read_activity_file(&mut self.athlete, Path::new(file)) {
            Ok(count) => println!("read {} activity records from {}", count, file),
            Err(err) => println!("read command failed: {}", err),
        }
    }

    fn cmd_add_goal(&mut self, rest: &str) {
        let result = parse_args(rest).and_then(|args| {
            let exercise = required(&args, "exercise")?;
            let metric = required(&args, "metric")?;
            let timeframe = required(&args, "timeframe")?;
            let target: u32 = required(&args, "target")?
                .parse()
                .map_err(|_| "target must be a positive integer".to_string())?;
            self.athlete
                .add_goal(exercise, metric, timeframe, target)
                .map_err(|err| err.to_string())
        });
        if let Err(message) = result {
            println!("add_goal command failed: {}", message);
        }
    }

    fn cmd_delete_goal(&mut self, rest: &str) {
        let result = parse_args(rest).and_then(|args| {
            let exercise = required(&args, "exercise")?;
            let metric = required(&args, "metric")?;
            let timeframe = required(&args, "timeframe")?;
            self.athlete
                .delete_goal(exercise, metric, timeframe)
                .map_err(|err| err.to_string())
        });
        if let Err(message) = result {
            println!("delete_goal command failed: {}", message);
        }
    }

    fn cmd_show_goals(&self, arg: &str) {
        match kind_arg(arg) {
            Ok(kind) => {
                for line in self.athlete.list_goals(kind) {
                    println!("{}", line);
                }
            }
            Err(message) => println!("show_goals command failed: {}", message),
        }
    }

    fn cmd_summarize_goals(&self, arg: &str) {
        match kind_arg(arg) {
            Ok(kind) => {
                let today = Local::now().date_naive();
                for report in self.athlete.summarize_goals_at(kind, today) {
                    println!("{}", report);
                }
            }
            Err(message) => println!("summarize_goals command failed: {}", message),
        }
    }

    fn cmd_show_activities(&self, rest: &str) {
        match listing_args(rest) {
            Ok((kind, window)) => {
                for line in self.athlete.list_activities(kind, window) {
                    println!("{}", line);
                }
            }
            Err(message) => println!("show_activities command failed: {}", message),
        }
    }

    fn cmd_summarize_activities(&self, rest: &str) {
        match listing_args(rest) {
            Ok((kind, window)) => {
                for line in self.athlete.summarize_activities(kind, window) {
                    println!("{}", line);
                }
            }
            Err(message) => println!("summarize_activities command failed: {}", message),
        }
    }
}

fn default_if_empty<'a>(arg: &'a str, default: &'a str) -> &'a str {
    if arg.is_empty() {
        default
    } else {
        arg
    }
}

/// Split `key=value` tokens into an argument map.
fn parse_args(rest: &str) -> Result<HashMap<String, String>, String> {
    let mut args = HashMap::new();
    for token in rest.split_whitespace() {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got {:?}", token))?;
        args.insert(key.to_string(), value.to_string());
    }
    Ok(args)
}

fn required<'a>(args: &'a HashMap<String, String>, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .map(String::as_str)
        .ok_or_else(|| format!("missing required argument {}=", key))
}

/// Optional bare exercise argument.
fn kind_arg(arg: &str) -> Result<Option<ActivityKind>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    ActivityKind::from_name(arg)
        .map(Some)
        .ok_or_else(|| format!("invalid exercise: {:?}", arg))
}

/// Kind and date window for the activity listing commands. Omitted start
/// defaults to the epoch, omitted end to today.
fn listing_args(rest: &str) -> Result<(Option<ActivityKind>, DateWindow), String> {
    let args = parse_args(rest)?;

    let kind = match args.get("exercise") {
        Some(name) => Some(
            ActivityKind::from_name(name).ok_or_else(|| format!("invalid exercise: {:?}", name))?,
        ),
        None => None,
    };

    let start = match args.get("start") {
        Some(text) => parse::parse_date(text).map_err(|err| err.to_string())?,
        None => chrono::NaiveDate::default(),
    };
    let end = match args.get("end") {
        Some(text) => parse::parse_date(text).map_err(|err| err.to_string())?,
        None => Local::now().date_naive(),
    };

    Ok((kind, DateWindow::new(start, end)))
}
