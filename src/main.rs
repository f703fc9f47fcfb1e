//! `chordsbox` command line: song store commands and the terminal viewer.

use std::path::PathBuf;
use std::{io, io::Read, panic, time::Duration};

use chordsbox::app::App;
use chordsbox::config::Config;
use chordsbox::constants::{search::DEFAULT_LIMIT, viewer::POLL_INTERVAL_MS};
use chordsbox::display::FontScale;
use chordsbox::error::{Error, Result};
use chordsbox::settings::{ColorScheme, ColorSchemePatch, SettingsFile, UserSettings};
use chordsbox::sheet::{plan_sheet, text_sheet};
use chordsbox::song::{self, apply, EditCommand, Song};
use chordsbox::store::{GitHubStore, SongRepository};
use chordsbox::types::SongId;
use chordsbox::ui;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

/// Chord sheet compiler, viewer and GitHub-backed song store.
#[derive(Debug, Parser)]
#[command(name = "chordsbox", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List stored songs
    List,
    /// Find songs by title
    Search {
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Print a song as a text chord chart
    Show { id: String },
    /// Print the JSON render plan for a song
    Render {
        id: String,
        /// Viewport width in pixels [default: CHORDSBOX_VIEWPORT]
        #[arg(long)]
        width: Option<u32>,
        /// Font size offset, -4 to 4
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i8,
    },
    /// Open the full-screen viewer
    View {
        id: String,
        /// Viewport width in pixels [default: CHORDSBOX_VIEWPORT]
        #[arg(long)]
        width: Option<u32>,
    },
    /// Print the editor text for a song
    Lyrics { id: String },
    /// Compile lyrics from stdin to JSON lines
    Compile,
    /// Create a song from a lyrics file
    Import {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        capo: Option<u8>,
        /// Time signature, e.g. 4/4
        #[arg(long = "time")]
        time_signature: Option<String>,
        /// Tag to attach; repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Put a chord above one character of a line
    SetChord {
        id: String,
        line: usize,
        position: usize,
        chord: String,
        #[arg(long, default_value_t = 0)]
        section: usize,
    },
    /// Remove the chord at an index of a line
    RmChord {
        id: String,
        line: usize,
        index: usize,
        #[arg(long, default_value_t = 0)]
        section: usize,
    },
    /// Insert a blank (instrumental) line
    Blank {
        id: String,
        index: usize,
        #[arg(long, default_value_t = 0)]
        section: usize,
    },
    /// Delete a line
    RmLine {
        id: String,
        index: usize,
        #[arg(long, default_value_t = 0)]
        section: usize,
    },
    /// Delete a song
    Delete { id: String },
    /// Manage color schemes
    Scheme {
        #[command(subcommand)]
        action: SchemeCommand,
    },
}

#[derive(Debug, Subcommand)]
enum SchemeCommand {
    /// List color schemes; the current one is marked with `*`
    List,
    /// Switch the current scheme
    Use { id: String },
    /// Add a scheme
    Add {
        id: String,
        name: String,
        #[arg(long, value_parser = hex_color)]
        background: String,
        #[arg(long, value_parser = hex_color)]
        lyrics: String,
        #[arg(long, value_parser = hex_color)]
        chord: String,
    },
    /// Change a scheme's name or colors
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = hex_color)]
        background: Option<String>,
        #[arg(long, value_parser = hex_color)]
        lyrics: Option<String>,
        #[arg(long, value_parser = hex_color)]
        chord: Option<String>,
    },
    /// Remove a scheme
    Rm { id: String },
}

fn hex_color(s: &str) -> std::result::Result<String, String> {
    let valid = s.len() == 7
        && s.starts_with('#')
        && s.chars().skip(1).all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(s.to_ascii_lowercase())
    } else {
        Err(format!("expected #rrggbb, got {s:?}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The viewer owns the terminal, so it gets no log output.
    if !matches!(cli.command, Command::View { .. }) {
        init_logging();
    }

    let config = Config::load()?;
    if let Err(e) = run(cli.command, &config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(command: Command, config: &Config) -> Result<()> {
    let repo = SongRepository::new(GitHubStore::new(config));

    match command {
        Command::Compile => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            println!("{}", serde_json::to_string_pretty(&song::compile_lyrics(&input))?);
        }
        Command::Scheme { action } => run_scheme(action, config)?,
        Command::List => {
            for meta in repo.list().await? {
                println!("{:<32} {:<4} {}", meta.id, meta.key, meta.title);
            }
        }
        Command::Search { query, limit } => {
            for meta in repo.search(&query, limit).await? {
                println!("{:<32} {}", meta.id, meta.title);
            }
        }
        Command::Show { id } => {
            print!("{}", text_sheet(&load(&repo, &id).await?));
        }
        Command::Render { id, width, offset } => {
            let song = load(&repo, &id).await?;
            let settings = load_settings(config);
            let scale = FontScale::for_viewport(width.unwrap_or(config.viewport_width), offset);
            let plan = plan_sheet(&song, settings.current_scheme(), scale);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::View { id, width } => {
            let song = load(&repo, &id).await?;
            let app = App::new(
                song,
                load_settings(config),
                config.settings_path.clone().map(SettingsFile::new),
                width.unwrap_or(config.viewport_width),
            );
            run_viewer(app)?;
        }
        Command::Lyrics { id } => {
            println!("{}", load(&repo, &id).await?.lyrics_input());
        }
        Command::Import { file, title, key, capo, time_signature, tags } => {
            let text = fs_err::read_to_string(&file)?;

            let mut song = Song::new(title);
            if let Some(key) = key {
                song.key = key;
            }
            song.capo = capo.unwrap_or(0);
            song.time_signature = time_signature;
            song.tags = tags;
            song.set_lyrics(&text);

            let created = repo.create(song).await?;
            println!("{}", created.id);
        }
        Command::SetChord { id, line, position, chord, section } => {
            edit_song(&repo, &id, &EditCommand::SetChord { section, line, position, chord }).await?;
        }
        Command::RmChord { id, line, index, section } => {
            edit_song(&repo, &id, &EditCommand::RemoveChord { section, line, index }).await?;
        }
        Command::Blank { id, index, section } => {
            edit_song(&repo, &id, &EditCommand::InsertBlankLine { section, index }).await?;
        }
        Command::RmLine { id, index, section } => {
            edit_song(&repo, &id, &EditCommand::DeleteLine { section, index }).await?;
        }
        Command::Delete { id } => {
            repo.delete(&SongId::new(id)).await?;
        }
    }

    Ok(())
}

async fn load(repo: &SongRepository<GitHubStore>, id: &str) -> Result<Song> {
    let id = SongId::new(id);
    repo.get(&id).await?.ok_or_else(|| Error::NotFound(id.to_string()))
}

async fn edit_song(repo: &SongRepository<GitHubStore>, id: &str, edit: &EditCommand) -> Result<()> {
    let song = load(repo, id).await?;
    let edited = apply(&song, edit)?;
    repo.save(edited).await?;
    Ok(())
}

fn load_settings(config: &Config) -> UserSettings {
    config
        .settings_path
        .as_ref()
        .map(|p| SettingsFile::new(p).load())
        .unwrap_or_default()
}

fn run_scheme(action: SchemeCommand, config: &Config) -> Result<()> {
    let file = config.settings_path.clone().map(SettingsFile::new).ok_or_else(|| {
        Error::config(
            "No settings location",
            "Set CHORDSBOX_SETTINGS to the settings file path",
        )
    })?;
    let settings = file.load();

    if let SchemeCommand::List = action {
        let current = settings.current_scheme().map(|s| s.id.as_str());
        for scheme in &settings.color_schemes {
            let mark = if Some(scheme.id.as_str()) == current { '*' } else { ' ' };
            let c = &scheme.colors;
            println!(
                "{mark} {:<12} {:<12} background {}  lyrics {}  chord {}",
                scheme.id, scheme.name, c.background, c.lyrics, c.chord
            );
        }
        return Ok(());
    }

    let next = change_schemes(&settings, action)?;
    file.save(&next)?;
    println!("Saved {}", file.path().display());
    Ok(())
}

/// Settings after a scheme change. Listing changes nothing.
fn change_schemes(settings: &UserSettings, action: SchemeCommand) -> Result<UserSettings> {
    let known = |id: &str| {
        settings
            .scheme(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("color scheme {id}")))
    };

    match action {
        SchemeCommand::List => Ok(settings.clone()),
        SchemeCommand::Use { id } => settings.with_current_scheme(&id),
        SchemeCommand::Add { id, name, background, lyrics, chord } => {
            if settings.scheme(&id).is_some() {
                return Err(Error::AlreadyExists(format!("color scheme {id}")));
            }
            Ok(settings.with_scheme_added(ColorScheme::new(&id, &name, &background, &lyrics, &chord)))
        }
        SchemeCommand::Update { id, name, background, lyrics, chord } => {
            known(&id)?;
            Ok(settings.with_scheme_updated(&id, ColorSchemePatch { name, background, lyrics, chord }))
        }
        SchemeCommand::Rm { id } => {
            known(&id)?;
            Ok(settings.without_scheme(&id))
        }
    }
}

// Helper function to ensure the terminal is cleaned up on exit
fn cleanup_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_viewer(app: App) -> Result<()> {
    // Restore the terminal before the default panic output
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = viewer_loop(&mut terminal, app);

    if let Err(e) = cleanup_terminal(&mut terminal) {
        eprintln!("Error cleaning up terminal: {e:?}");
    }
    res
}

fn viewer_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let event::Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
