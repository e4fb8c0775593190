use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use suggestbox::adapter::{ListSpec, SourceCommand, WidgetOptions};
use suggestbox::terminal::{KeyCode, KeyModifiers, Terminal, TerminalEvent};
use suggestbox::ui::frame::RenderFrame;
use suggestbox::ui::span::Span;
use suggestbox::ui::style::{Color, Style};
use suggestbox::widgets::traits::{Drawable, InteractionResult, Interactive, RenderContext};
use suggestbox::{Autocomplete, Registry, WidgetEvent};
use tracing_subscriber::EnvFilter;

const DEMO_LIST: &str = "Ada, Assembly, C, C++, Clojure, COBOL, Crystal, Dart, Elixir, Elm, \
    Erlang, Fortran, Go, Haskell, Java, JavaScript, Julia, Kotlin, Lisp, Lua, Nim, OCaml, \
    Pascal, Perl, PHP, Prolog, Python, Racket, Ruby, Rust, Scala, Scheme, Swift, TypeScript, Zig";
const LOG_ENV: &str = "SUGGESTBOX_LOG";
const TICK: Duration = Duration::from_millis(50);
/// Rows above the widget: title and a blank line.
const HEADER_ROWS: u16 = 2;

#[derive(Debug, Parser)]
#[command(name = "suggestbox", about = "Interactive suggestion box for the terminal")]
struct Cli {
    /// Widget options file (.yaml, .yml or .json).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated candidate list.
    #[arg(long)]
    list: Option<String>,
    #[arg(long)]
    min_chars: Option<usize>,
    #[arg(long)]
    max_items: Option<usize>,
    #[arg(long)]
    auto_first: bool,
    #[arg(long)]
    show_hint: bool,
    /// Command answering queries with a JSON array; the query arrives in
    /// SUGGEST_Q.
    #[arg(long)]
    source_cmd: Option<String>,
    #[arg(long, default_value = "Language")]
    label: String,
    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing(cli.log_file.as_deref())?;

    let options = merge_options(&cli)?;
    let label = options.label.clone().unwrap_or_else(|| cli.label.clone());
    let setup = options.into_setup();
    let registry = Registry::new();

    let mut terminal = Terminal::new()?;
    let max_visible = terminal.size().height.saturating_sub(HEADER_ROWS + 4).max(3);
    let mut widget = Autocomplete::new("demo", label, setup.config)
        .with_list(setup.list.unwrap_or_default())
        .with_registry(registry.clone())
        .with_max_visible(max_visible as usize);
    widget.on_event(|event| match event {
        WidgetEvent::Selected { text, origin, .. } => {
            tracing::info!(%text, ?origin, "selected");
        }
        other => tracing::trace!(?other, "widget event"),
    });
    widget.on_focus();

    terminal.enter()?;
    let outcome = event_loop(&mut terminal, &mut widget);
    terminal.exit()?;

    let submitted = outcome?;
    widget.dispose();
    if let Some(value) = submitted {
        println!("{value}");
    }
    Ok(())
}

fn merge_options(cli: &Cli) -> Result<WidgetOptions, Box<dyn Error>> {
    let mut options = match cli.config.as_ref() {
        Some(path) => WidgetOptions::load(path)?,
        None => WidgetOptions::default(),
    };
    if let Some(list) = cli.list.as_ref() {
        options.list = Some(ListSpec::Csv(list.clone()));
    }
    if cli.min_chars.is_some() {
        options.min_chars = cli.min_chars;
    }
    if cli.max_items.is_some() {
        options.max_items = cli.max_items;
    }
    if cli.auto_first {
        options.auto_first = Some(true);
    }
    if cli.show_hint {
        options.show_hint = Some(true);
    }
    if let Some(command) = cli.source_cmd.as_ref() {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or("--source-cmd is empty")?;
        options.source = Some(SourceCommand {
            program,
            args: parts.collect(),
            target: "suggest".to_string(),
            timeout_ms: None,
        });
    }
    if options.list.is_none() && options.source.is_none() {
        options.list = Some(ListSpec::Csv(DEMO_LIST.to_string()));
    }
    Ok(options)
}

fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Runs until Enter submits the field, or Esc on a closed list or Ctrl-C
/// aborts. Returns the submitted value.
fn event_loop(
    terminal: &mut Terminal,
    widget: &mut Autocomplete,
) -> io::Result<Option<String>> {
    let mut render_requested = true;

    loop {
        let ctx = RenderContext {
            origin_row: HEADER_ROWS,
            ..RenderContext::new(terminal.size().width)
        };
        if render_requested {
            terminal.render_frame(&compose(widget, &ctx))?;
            render_requested = false;
        }

        let result = match terminal.poll_event(TICK)? {
            TerminalEvent::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(None);
                }
                let was_open = widget.is_open();
                let result = widget.on_key(key);
                if !result.prevent_default {
                    match key.code {
                        KeyCode::Enter => {
                            widget.on_submit();
                            return Ok(Some(widget.value().to_string()));
                        }
                        KeyCode::Esc if !was_open => return Ok(None),
                        _ => {}
                    }
                }
                result
            }
            TerminalEvent::Pointer(press) => widget.on_pointer(press, &ctx),
            TerminalEvent::FocusLost => widget.on_blur(),
            TerminalEvent::FocusGained => {
                widget.on_focus();
                InteractionResult::redraw()
            }
            TerminalEvent::Resize(_) => InteractionResult::redraw(),
            TerminalEvent::Tick => widget.on_tick(),
        };
        render_requested |= result.request_render;
    }
}

fn compose(widget: &Autocomplete, ctx: &RenderContext) -> RenderFrame {
    let mut frame = RenderFrame::new();
    frame.push(vec![
        Span::styled("suggestbox", Style::new().bold()).no_wrap(),
        Span::styled(
            "  type to search, ↑↓ to move, Enter to pick, Esc to quit",
            Style::new().color(Color::DarkGrey),
        )
        .no_wrap(),
    ]);
    frame.push(Vec::new());
    frame.append(widget.draw(ctx).into());
    frame
}
