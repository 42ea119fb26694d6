/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;
use std::path::{Path, PathBuf};

use failure::Error;
use log::{Level, LevelFilter};

/// Builder-style setup for logging.
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
    color: Color,
}

impl GlobalLogger {
    /// Also write the log to a file.
    ///
    /// NOTE: Relative paths will not be resolved until apply() is called.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level {
            std::i32::MIN..=-1 => Verbosity::Quiet,
            0 => Verbosity::Default,
            _ => Verbosity::Loud,
        };
        self
    }

    /// Disable ANSI colors on the level tag (e.g. when stdout is not a terminal).
    pub fn plain(&mut self) -> &mut Self
    { self.color = Color::Never; self }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Quiet, Default, Loud }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Color { Always, Never }

impl Default for Color {
    fn default() -> Self { Color::Always }
}

impl GlobalLogger {
    fn crate_level(&self) -> LevelFilter
    {
        match self.verbosity {
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Default => LevelFilter::Debug,
            Verbosity::Loud => LevelFilter::Trace,
        }
    }

    /// Install the logger.
    ///
    /// Fails if a global logger has already been set.
    pub fn apply(&mut self) -> Result<(), Error>
    {Ok({
        use std::time::Instant;

        let start = Instant::now();
        let color = self.color;
        let crate_level = self.crate_level();

        let mut fern = fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                let level = match color {
                    Color::Always => ColorizedLevel(record.level()).to_string(),
                    Color::Never => record.level().to_string(),
                };
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_nanos() / 1_000_000,
                    record.target(),
                    level,
                    message))
            })
            .level(match self.verbosity {
                Verbosity::Quiet => LevelFilter::Warn,
                _ => LevelFilter::Info,
            })
            .level_for("crysym", crate_level)
            .level_for("crysym_spacegroup", crate_level)
            .level_for("crysym_lattice", crate_level)
            .level_for("crysym_config", crate_level)
            .chain(std::io::stdout());

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(fern::log_file(path)?);
        }

        fern.apply()?;
    })}
}

/// Displays a log level in the colors used by `GlobalLogger`.
#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ansi_term::Colour;

        let style = match self.0 {
            Level::Error => Colour::Red.bold(),
            Level::Warn  => Colour::Red.normal(),
            Level::Info  => Colour::Cyan.bold(),
            Level::Debug => Colour::Yellow.dimmed(),
            Level::Trace => Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(format!("{:<5}", self.0)))
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        let mut logger = GlobalLogger::default();
        assert_eq!(logger.crate_level(), LevelFilter::Debug);
        assert_eq!(logger.verbosity(-7).crate_level(), LevelFilter::Warn);
        assert_eq!(logger.verbosity(3).crate_level(), LevelFilter::Trace);
        assert_eq!(logger.verbosity(0).crate_level(), LevelFilter::Debug);
    }

    #[test]
    fn colorized_level_keeps_the_name() {
        let text = ColorizedLevel(Level::Warn).to_string();
        assert!(text.contains("WARN"));
        assert_ne!(text, "WARN ");
    }
}
