use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use dash_wm::event_loop::{ConsoleInputDriver, ControlFlow, EventLoop};
use dash_wm::{Shell, WindowContent, WindowDefinition, WindowRegistry, tracing_sub};

#[derive(Parser, Debug)]
#[command(name = "dash-wm", about = "A floating window manager for terminal dashboards.")]
struct Args {
    /// Idle redraw interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

struct StaticText(&'static str);

impl WindowContent for StaticText {
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(self.0).style(style).wrap(Wrap { trim: false }),
            area,
        );
    }
}

fn registry() -> WindowRegistry {
    let defs = vec![
        WindowDefinition::new(
            "tasks",
            "Tasks",
            400,
            400,
            Box::new(|| {
                Box::new(StaticText(indoc! {"
                    [ ] triage inbox
                    [ ] review standup notes
                    [x] ship weekly report
                "}))
            }),
        ),
        WindowDefinition::new(
            "calendar",
            "Calendar",
            480,
            320,
            Box::new(|| {
                Box::new(StaticText(indoc! {"
                    09:00 standup
                    11:00 design review
                    15:30 1:1
                "}))
            }),
        ),
        WindowDefinition::new(
            "notes",
            "Notes",
            400,
            300,
            Box::new(|| Box::new(StaticText("Drag the title bar to move, edges to resize."))),
        ),
        WindowDefinition::new(
            "clock",
            "Clock",
            320,
            200,
            Box::new(|| Box::new(StaticText("A pinned window: no drag, no resize."))),
        )
        .with_disable_drag_resize(),
        WindowDefinition::new(
            "zen",
            "Zen",
            480,
            320,
            Box::new(|| Box::new(StaticText("Focus mode. Close this window to resume."))),
        )
        .with_focus_mode()
        .with_only_close_button(),
    ];
    // Static definitions above are known-valid; a panic here is a programmer
    // error, not a runtime condition.
    WindowRegistry::new(defs).unwrap()
}

fn main() -> io::Result<()> {
    tracing_sub::init_default();
    let args = Args::parse();

    let mut shell = Shell::new(registry());
    shell.wm_mut().open_or_restore(&"tasks".into());
    shell.wm_mut().open_or_restore(&"calendar".into());

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let driver = ConsoleInputDriver::new();
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(args.tick_ms));
    let result = event_loop.run(|_, event| {
        match event {
            None => {
                terminal
                    .draw(|frame| shell.render(frame))
                    .map_err(|err| io::Error::other(err.to_string()))?;
            }
            Some(Event::Key(key))
                if key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(ControlFlow::Quit);
            }
            Some(event) => {
                shell.handle_event(&event);
            }
        }
        Ok(ControlFlow::Continue)
    });

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
