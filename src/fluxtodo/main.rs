use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use fluxtodo::api::{self, CmdMessage, ConfigAction, ListFilter, MessageLevel, TodoApi};
use fluxtodo::app::TodoApp;
use fluxtodo::config::TodoConfig;
use fluxtodo::dispatcher::Dispatcher;
use fluxtodo::error::{Result, TodoError};
use fluxtodo::events::Subscription;
use fluxtodo::index::DisplayItem;
use fluxtodo::storage::fs::FileStorage;
use fluxtodo::sync::LocalStorageAdapter;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

const DATA_DIR_ENV: &str = "FLUXTODO_DATA";
const SLOTS_DIR: &str = "slots";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type FileApi = TodoApi<LocalStorageAdapter<FileStorage>>;

/// The todo list is opened on first use, so `config` and `init` still work
/// when the current slot cannot be read.
struct AppContext {
    data_dir: PathBuf,
    api: Option<FileApi>,
    _change_log: Option<Subscription>,
}

impl AppContext {
    fn api(&mut self) -> Result<&FileApi> {
        if self.api.is_none() {
            let (api, change_log) = open_api(&self.data_dir)?;
            self.api = Some(api);
            self._change_log = Some(change_log);
        }
        self.api
            .as_ref()
            .ok_or_else(|| TodoError::Storage("todo list is not open".into()))
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = AppContext {
        data_dir: resolve_data_dir(&cli)?,
        api: None,
        _change_log: None,
    };

    match cli.command {
        Some(Commands::Add { text }) => handle_add(&mut ctx, text),
        Some(Commands::Toggle { indexes }) => handle_toggle(&mut ctx, indexes),
        Some(Commands::Clear) => handle_clear(&mut ctx),
        Some(Commands::List { pending, done }) => handle_list(&mut ctx, pending, done),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&mut ctx, false, false),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "fluxtodo=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "fluxtodo", "fluxtodo")
        .ok_or_else(|| TodoError::Storage("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn open_api(data_dir: &Path) -> Result<(FileApi, Subscription)> {
    let config = TodoConfig::load(data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), slot = %config.slot_name, "opening todo list");

    let storage = FileStorage::new(data_dir.join(SLOTS_DIR));
    let adapter = LocalStorageAdapter::new(config.slot_name, storage)?;
    let dispatcher = Rc::new(Dispatcher::new());
    let app = TodoApp::new(dispatcher, adapter);
    let change_log = app.subscribe(|event| {
        if event.is_mutation() {
            tracing::debug!(?event, "store changed");
        }
    });

    Ok((TodoApi::new(app), change_log))
}

fn handle_add(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let result = ctx.api()?.add_todo(&text.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api()?.toggle_todos(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api()?.clear_todos()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, pending: bool, done: bool) -> Result<()> {
    let filter = match (pending, done) {
        (true, _) => ListFilter::Pending,
        (_, true) => ListFilter::Done,
        _ => ListFilter::All,
    };
    let result = ctx.api()?.list_todos(filter)?;
    print_items(&result.listed_items);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api::config(&ctx.data_dir, action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            for key in TodoConfig::KEYS {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = api::init(&ctx.data_dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 80;
const DONE_MARKER: &str = "[x] ";
const PENDING_MARKER: &str = "[ ] ";

fn print_items(items: &[DisplayItem]) {
    if items.is_empty() {
        println!("No todos.");
        return;
    }

    for dp in items {
        let idx_str = format!("{:>3}. ", dp.index);
        let marker = if dp.item.complete {
            DONE_MARKER
        } else {
            PENDING_MARKER
        };
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + marker.width());
        let text = truncate_to_width(&dp.item.text.replace('\n', " "), available);

        if dp.item.complete {
            println!(
                "{}{}{}",
                idx_str.dimmed(),
                marker.green(),
                text.strikethrough().dimmed()
            );
        } else {
            println!("{}{}{}", idx_str.yellow(), marker, text);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
