#![forbid(unsafe_code)]

//! elide demo binary entry point.

use std::time::{Duration, Instant};

use elide::Buffer;
use elide_demo::app::{Control, DemoApp, DemoEvent};
use elide_demo::cli::Opts;
use elide_demo::logging;
use elide_demo::terminal::TerminalSession;
use tracing::info;

fn main() {
    let opts = Opts::parse();

    if let Some(path) = &opts.log
        && let Err(err) = logging::init(path)
    {
        eprintln!("elide-demo: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(&opts) {
        eprintln!("elide-demo: {err}");
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> elide::Result<()> {
    let session = TerminalSession::new(opts.mouse)?;
    let mut size = session.size()?;
    let mut app = DemoApp::new(opts, size);
    app.attach();
    info!(width = size.width, height = size.height, "demo started");

    let deadline =
        (opts.exit_after_ms > 0).then(|| Instant::now() + Duration::from_millis(opts.exit_after_ms));
    let mut buf = Buffer::new(size.width, size.height);

    loop {
        app.draw(&mut buf);
        session.present(&buf)?;

        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            break;
        }
        let mut timeout = app.poll_timeout(now);
        if let Some(deadline) = deadline {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }

        if let Some(event) = session.next_event(timeout)? {
            if let DemoEvent::Resize(next) = event {
                size = next;
                buf = Buffer::new(size.width, size.height);
            }
            if app.handle(event, Instant::now()) == Control::Exit {
                break;
            }
        }
        app.tick(Instant::now());
    }

    app.detach();
    info!("demo finished");
    Ok(())
}
