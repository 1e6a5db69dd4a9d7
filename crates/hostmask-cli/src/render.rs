use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use hostmask_core::Severity;
use hostmask_engine::{LogFn, ProgressFn};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputStyle {
    Plain,
    Rich,
}

pub fn current_output_style(plain: bool) -> OutputStyle {
    if plain || !std::io::stdout().is_terminal() {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    }
}

pub fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("{status}: {message}"),
        OutputStyle::Rich => format!(
            "{} {message}",
            colorize(status_style(status), &format!("[{status}]"))
        ),
    }
}

pub fn progress_observer(style: OutputStyle) -> ProgressFn {
    match style {
        OutputStyle::Plain => Box::new(|message, percent| {
            println!("[{percent:>3}%] {message}");
        }),
        OutputStyle::Rich => {
            let bar = ProgressBar::new(100);
            if let Ok(template) = ProgressStyle::with_template(
                "{spinner:.cyan.bold} {msg:<24} [{bar:20.cyan/blue}] {pos:>3}%",
            ) {
                bar.set_style(template.progress_chars("=>-"));
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            Box::new(move |message, percent| {
                bar.set_message(message.to_string());
                bar.set_position(u64::from(percent));
                if percent >= 100 {
                    bar.finish_and_clear();
                }
            })
        }
    }
}

pub fn log_observer(style: OutputStyle) -> LogFn {
    Box::new(move |message, severity| {
        let line = match style {
            OutputStyle::Plain => format!("{}: {message}", severity.as_str()),
            OutputStyle::Rich => format!(
                "{} {message}",
                colorize(severity_style(severity), &format!("[{}]", severity.as_str()))
            ),
        };
        eprintln!("{line}");
    })
}

fn status_style(status: &str) -> Style {
    match status {
        "success" | "cleared" => Style::new()
            .fg_color(Some(AnsiColor::Green.into()))
            .effects(Effects::BOLD),
        "failure" | "invalid-operation" => Style::new()
            .fg_color(Some(AnsiColor::Red.into()))
            .effects(Effects::BOLD),
        "no-backup" | "not-implemented" => Style::new().fg_color(Some(AnsiColor::Yellow.into())),
        _ => Style::new().fg_color(Some(AnsiColor::BrightBlue.into())),
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::new().fg_color(Some(AnsiColor::BrightBlue.into())),
        Severity::Warning => Style::new().fg_color(Some(AnsiColor::Yellow.into())),
        Severity::Error => Style::new()
            .fg_color(Some(AnsiColor::Red.into()))
            .effects(Effects::BOLD),
    }
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
