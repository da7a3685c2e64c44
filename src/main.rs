mod app;
mod event;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use katsuyo::config::Config;

use app::{App, AppScreen, Overlay};
use event::{AppEvent, EventHandler};
use ui::components::answer_box::AnswerBox;
use ui::components::mode_tabs::ModeTabs;
use ui::components::popup::Popup;
use ui::components::progress_bar::ProgressBar;
use ui::components::verb_card::VerbCard;
use ui::layout::DrillLayout;

#[derive(Parser)]
#[command(name = "katsuyo", version, about = "Japanese verb conjugation drills in the terminal")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Mode to start in (te, ta, ...)")]
    mode: Option<String>,

    #[arg(short, long, help = "Load verbs from a JSON file")]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Fetch verbs from a URL")]
    url: Option<String>,

    #[arg(long, help = "Milliseconds before the next verb after a correct answer")]
    delay_ms: Option<u64>,

    #[arg(long, help = "Seed for a reproducible verb order")]
    seed: Option<u64>,

    #[arg(short, long, help = "Reset without asking for confirmation")]
    yes: bool,

    #[arg(long, help = "Print the configured modes and exit")]
    list_modes: bool,

    #[arg(long, help = "Print the bundled themes and exit")]
    list_themes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path.to_string_lossy().to_string());
    } else if let Some(url) = cli.url {
        config.catalog_path = None;
        config.catalog_url = Some(url);
    }
    if let Some(delay) = cli.delay_ms {
        config.advance_delay_ms = delay;
    }
    if cli.yes {
        config.confirm_reset = false;
    }

    init_logging(&config.log_file);

    let modes = config.mode_table()?;
    config.normalize_default_mode(&modes);

    if cli.list_themes {
        for name in ui::theme::Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.list_modes {
        for spec in modes.iter() {
            println!(
                "{:<6} {:<10} {} / {} / {}",
                spec.id, spec.label, spec.kanji_field, spec.kana_field, spec.romaji_field
            );
        }
        return Ok(());
    }

    let theme = ui::theme::Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
    let source = config.catalog_source();

    let mut app = App::new(config, modes.clone(), theme, cli.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));
    events.spawn_catalog_load(source, modes);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file; stderr belongs to the alternate screen.
fn init_logging(path: &str) {
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::CatalogLoaded(result) => app.on_catalog(result),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.overlay {
        Overlay::ConfirmReset => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_reset(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_reset(false),
                _ => {}
            }
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    match app.screen() {
        AppScreen::Loading | AppScreen::LoadError => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.should_quit = true;
            }
        }
        AppScreen::Drill => handle_drill_key(app, key),
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.next_mode(),
        KeyCode::BackTab => app.prev_mode(),
        KeyCode::F(n) if (1..=9).contains(&n) => app.select_mode(usize::from(n - 1)),
        KeyCode::F(12) => app.overlay = Overlay::Help,
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_reset()
        }
        KeyCode::Char('?') if app.view.input.is_empty() => app.overlay = Overlay::Help,
        _ => app.handle_input(key),
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen() {
        AppScreen::Loading => render_loading(frame, app),
        AppScreen::Drill => render_drill(frame, app),
        AppScreen::LoadError => render_load_error(frame, app),
    }

    match app.overlay {
        Overlay::ConfirmReset => render_confirm_reset(frame, app),
        Overlay::Help => render_help(frame, app),
        Overlay::None => {}
    }
}

fn render_loading(frame: &mut ratatui::Frame, app: &App) {
    let area = ui::layout::centered_rect(40, 20, frame.area());
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading verbs…",
            Style::default().fg(app.theme.colors.text_muted()),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(text, area);
}

fn render_load_error(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = ui::layout::centered_rect(60, 30, frame.area());
    let message = app.view.load_error.as_deref().unwrap_or("unknown error");
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(colors.error()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Drills are unavailable. [q] Quit",
            Style::default().fg(colors.text_muted()),
        )),
    ];
    frame.render_widget(Popup::new("Failed to load verbs", lines, app.theme), area);
}

fn render_drill(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = DrillLayout::new(area);

    let round = app
        .controller
        .session(app.controller.active_mode())
        .map_or(1, |s| s.cycles_completed() + 1);
    let mut header_info = format!(
        " {} | Score {} | Round {}",
        app.active_mode_label(),
        app.view.score,
        round
    );
    if !layout.tier.show_progress_bar() {
        header_info.push_str(&format!(" | {:.0}%", app.view.progress));
    }
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " katsuyo ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.accent_dim())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    if let Some(tabs_area) = layout.tabs {
        let tabs = ModeTabs::new(
            app.controller.modes(),
            app.controller.active_mode(),
            app.theme,
        );
        frame.render_widget(tabs, tabs_area);
    }

    let card = VerbCard::new(
        app.view.prompt.as_deref(),
        app.active_mode_label(),
        app.theme,
    );
    frame.render_widget(card, layout.card);

    let answer = AnswerBox::new(&app.view.input, app.view.feedback, app.theme)
        .locked(app.controller.has_pending_advance());
    frame.render_widget(answer, layout.answer);

    if let Some(progress_area) = layout.progress {
        let bar = ProgressBar::new("Round progress", app.view.progress / 100.0, app.theme)
            .detail(format!("{}/{}", app.answered_in_round(), app.catalog_len()));
        frame.render_widget(bar, progress_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Enter] Check  [Tab] Mode  [Ctrl-R] Reset  [?] Help  [Esc] Quit ",
        Style::default().fg(colors.text_muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_confirm_reset(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = ui::layout::centered_rect(50, 25, frame.area());
    let lines = vec![
        Line::from(""),
        Line::from(format!(
            "  Start {} over? The current score will be lost.",
            app.active_mode_label()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  [y] Reset   [n] Cancel",
            Style::default().fg(colors.accent()),
        )),
    ];
    frame.render_widget(Popup::new("Reset progress", lines, app.theme), area);
}

fn render_help(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = ui::layout::centered_rect(60, 60, frame.area());
    let key_style = Style::default().fg(colors.accent());
    let rows = [
        ("Enter", "Check the answer"),
        ("Tab / Shift-Tab", "Next / previous mode"),
        ("F1-F9", "Jump to a mode"),
        ("Ctrl-R", "Reset the current mode"),
        ("Ctrl-U / Ctrl-W", "Clear line / delete word"),
        ("Esc / Ctrl-C", "Quit"),
    ];
    let mut lines = vec![
        Line::from(""),
        Line::from("  Answer in kanji, kana or romaji (any case)."),
        Line::from(""),
    ];
    for (key, action) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<18}"), key_style),
            Span::raw(action),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(colors.text_muted()),
    )));
    frame.render_widget(Popup::new("Help", lines, app.theme), area);
}
