// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Convoscribe CLI entrypoint.
//!
//! Talks to the template backend at `--api-url` (or `CONVOSCRIBE_API_URL`). Use `--demo` to run
//! against a built-in in-memory backend instead.

use std::error::Error;
use std::time::Duration;

use convoscribe::config::{parse_timeout_secs, ClientConfig};
use convoscribe::model::{TemplateId, TextMode};
use convoscribe::session::TemplateSession;
use convoscribe::store::{HttpBackend, MemoryBackend, TemplateBackend};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api-url <url>] [--timeout-secs <n>] <command>\n  {program} --demo <command>\n\nCommands:\n  list                            list stored templates\n  show <id>                       print a template's screens and options\n  compile <id>                    print the compiled script\n  export-strings <id> [--out <f>] write the string table artifact (default <name>.stf)\n  toggle-text <id>                switch inline/externalized text and save\n\nThe backend URL defaults to $CONVOSCRIBE_API_URL, then http://127.0.0.1:8000/api.\n--demo uses a built-in in-memory backend and cannot be combined with --api-url.\nSet RUST_LOG to adjust logging (default convoscribe=info)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Show(TemplateId),
    Compile(TemplateId),
    ExportStrings { template_id: TemplateId, out: Option<String> },
    ToggleText(TemplateId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    api_url: Option<String>,
    timeout: Option<Duration>,
    command: Command,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut demo = false;
    let mut api_url = None;
    let mut timeout = None;
    let mut out = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if demo {
                    return Err(());
                }
                demo = true;
            }
            "--api-url" => {
                if api_url.is_some() {
                    return Err(());
                }
                api_url = Some(args.next().ok_or(())?);
            }
            "--timeout-secs" => {
                if timeout.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                timeout = Some(parse_timeout_secs(&raw).map_err(|_| ())?);
            }
            "--out" => {
                if out.is_some() {
                    return Err(());
                }
                out = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => positional.push(arg),
        }
    }

    if demo && api_url.is_some() {
        return Err(());
    }

    let template_id = |raw: Option<&String>| -> Result<TemplateId, ()> {
        raw.ok_or(())?.parse().map_err(|_| ())
    };
    let command = match positional.first().map(String::as_str) {
        Some("list") if positional.len() == 1 => Command::List,
        Some("show") if positional.len() == 2 => Command::Show(template_id(positional.get(1))?),
        Some("compile") if positional.len() == 2 => {
            Command::Compile(template_id(positional.get(1))?)
        }
        Some("export-strings") if positional.len() == 2 => Command::ExportStrings {
            template_id: template_id(positional.get(1))?,
            out: out.take(),
        },
        Some("toggle-text") if positional.len() == 2 => {
            Command::ToggleText(template_id(positional.get(1))?)
        }
        _ => return Err(()),
    };

    if out.is_some() {
        return Err(());
    }

    Ok(CliOptions { demo, api_url, timeout, command })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "convoscribe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run<B: TemplateBackend>(
    mut session: TemplateSession<B>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::List => {
            for summary in session.list_templates().await? {
                println!("{}\t{}", summary.template_id, summary.name);
            }
        }
        Command::Show(template_id) => {
            session.load(template_id).await?;
            println!("{} (id={template_id}, {})", session.name(), session.mode());
            for screen in session.screens() {
                let end = if screen.terminates_conversation() { " [end]" } else { "" };
                println!(
                    "[{}] {}{end}: {}",
                    screen.screen_id(),
                    screen.display_name(),
                    session.resolve_text(screen.dialogue())
                );
                for option in screen.options() {
                    let target = option
                        .next_screen()
                        .map(|id| session.screen_name(id).to_owned())
                        .unwrap_or_else(|| "-".to_owned());
                    println!("    > {} -> {target}", session.resolve_text(option.text()));
                }
            }
        }
        Command::Compile(template_id) => {
            session.load(template_id).await?;
            print!("{}", session.compile_script().await?);
        }
        Command::ExportStrings { template_id, out } => {
            session.load(template_id).await?;
            let bytes = session.export_string_table().await?;
            let path = out.unwrap_or_else(|| session.string_table_file_name());
            std::fs::write(&path, &bytes)?;
            println!("wrote {} bytes to {path}", bytes.len());
        }
        Command::ToggleText(template_id) => {
            session.load(template_id).await?;
            let mode = session.toggle_text_mode();
            session.save().await?;
            match mode {
                TextMode::Externalized => {
                    let count = session.string_table().len();
                    println!("{}: externalized {count} strings", session.name())
                }
                TextMode::Inline => println!("{}: text moved back inline", session.name()),
            }
        }
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "convoscribe".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.demo {
            let session = TemplateSession::new(MemoryBackend::demo());
            return runtime.block_on(run(session, options.command));
        }

        let mut config = ClientConfig::from_env()?;
        if let Some(api_url) = options.api_url {
            config = config.with_api_url(api_url)?;
        }
        if let Some(timeout) = options.timeout {
            config = config.with_timeout(timeout);
        }
        let session = TemplateSession::new(HttpBackend::new(config)?);
        runtime.block_on(run(session, options.command))
    })();

    if let Err(err) = result {
        eprintln!("convoscribe: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use convoscribe::model::TemplateId;

    use super::{parse_options, CliOptions, Command};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_list() {
        let options = parse(&["list"]).expect("parse options");
        assert_eq!(
            options,
            CliOptions { demo: false, api_url: None, timeout: None, command: Command::List }
        );
    }

    #[test]
    fn parses_demo_flag_in_any_position() {
        assert!(parse(&["--demo", "show", "1"]).expect("parse options").demo);
        assert!(parse(&["show", "1", "--demo"]).expect("parse options").demo);
    }

    #[test]
    fn parses_backend_flags() {
        let options = parse(&["--api-url", "http://h/api", "--timeout-secs", "9", "compile", "4"])
            .expect("parse options");
        assert_eq!(options.api_url.as_deref(), Some("http://h/api"));
        assert_eq!(options.timeout, Some(Duration::from_secs(9)));
        assert_eq!(options.command, Command::Compile(TemplateId::new(4)));
    }

    #[test]
    fn parses_export_with_and_without_out() {
        let options = parse(&["export-strings", "3"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::ExportStrings { template_id: TemplateId::new(3), out: None }
        );

        let options = parse(&["export-strings", "3", "--out", "inn.stf"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::ExportStrings {
                template_id: TemplateId::new(3),
                out: Some("inn.stf".to_owned()),
            }
        );
    }

    #[test]
    fn parses_toggle_text() {
        let options = parse(&["toggle-text", "2"]).expect("parse options");
        assert_eq!(options.command, Command::ToggleText(TemplateId::new(2)));
    }

    #[test]
    fn rejects_missing_or_unknown_commands() {
        parse(&[]).unwrap_err();
        parse(&["publish", "1"]).unwrap_err();
        parse(&["show"]).unwrap_err();
        parse(&["show", "1", "2"]).unwrap_err();
        parse(&["show", "abc"]).unwrap_err();
    }

    #[test]
    fn rejects_out_outside_export() {
        parse(&["show", "1", "--out", "x"]).unwrap_err();
    }

    #[test]
    fn rejects_demo_with_api_url() {
        parse(&["--demo", "--api-url", "http://h", "list"]).unwrap_err();
    }

    #[test]
    fn rejects_bad_timeout_and_missing_values() {
        parse(&["--timeout-secs", "0", "list"]).unwrap_err();
        parse(&["list", "--api-url"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_and_duplicate_flags() {
        parse(&["--nope", "list"]).unwrap_err();
        parse(&["--demo", "--demo", "list"]).unwrap_err();
    }
}
