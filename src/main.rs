use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use skyburst::effects::Effect;
use skyburst::effects::fireworks::FireworksShow;
use skyburst::{Cli, Command, Error, PatternType, Result, SimConfig};
use std::fs::File;
use std::io::{BufWriter, stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const MIN_COLS: u16 = 10;
const MIN_ROWS: u16 = 5;
const DEFAULT_BG: (u8, u8, u8) = (0, 0, 0);

fn init_logging(cli: &Cli) -> Result<()> {
    // The terminal belongs to the show; logs only go to a file.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .init();
    Ok(())
}

fn is_quit(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn run_effect<E: Effect>(effect: &mut E) -> Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(_) if is_quit(&event) && !effect.captures_text() => break,
                Event::Resize(cols, rows) => {
                    tracing::debug!(cols, rows, "terminal resized");
                    effect.resize(*cols as usize, *rows as usize);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => effect.handle_event(&event),
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            effect.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        effect.render(&mut stdout)?;
    }

    Ok(())
}

fn build_show(cli: &Cli, config: &SimConfig, cols: u16, rows: u16) -> FireworksShow {
    let bg = cli.bg_color.unwrap_or(DEFAULT_BG);
    let mut show = FireworksShow::new(cols as usize, rows as usize, cli.scale, bg, config);
    show.select(cli.pattern.as_deref().map(PatternType::from_tag));
    if let Some(text) = &cli.text {
        show.apply(Command::CommitText(text.clone()));
    }
    show
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.sim_config()?;

    let (cols, rows) = terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(Error::SurfaceTooSmall { cols, rows, min_cols: MIN_COLS, min_rows: MIN_ROWS });
    }
    tracing::info!(cols, rows, scale = cli.scale, seed = ?config.seed, "starting show");
    let mut show = build_show(cli, &config, cols, rows);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    let entered = execute!(
        out,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        EnableMouseCapture
    );
    let result = entered
        .map_err(Error::from)
        .and_then(|()| run_effect(&mut show));

    // Restore the terminal even when the loop failed.
    execute!(out, Show, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;
    result
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("skyburst: {e}");
        std::process::exit(1);
    }
    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "show aborted");
        eprintln!("skyburst: {e}");
        std::process::exit(1);
    }
}
