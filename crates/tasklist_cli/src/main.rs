//! Interactive task list entry point.
//!
//! # Responsibility
//! - Parse process flags and optionally start file logging.
//! - Run the core command loop over real stdin/stdout.
//! - Turn an interrupt into a farewell and a successful exit.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, Write};
use tasklist_core::{
    default_log_level, init_logging, CommandLoop, ItemStore, LogLevel, FAREWELL,
};

#[derive(Parser, Debug)]
#[command(name = "tasklist", version, about = "Interactive in-memory task list")]
struct Cli {
    /// Absolute directory for rolling diagnostic logs. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    spawn_interrupt_watcher().context("failed to install interrupt handler")?;

    // Unlocked handle: the interrupt watcher must be able to write the farewell
    // while this thread is blocked on stdin.
    let mut session = CommandLoop::new(ItemStore::with_system_clock(), io::stdout());
    session.print_banner()?;
    let exit = session.run(io::stdin().lock())?;
    info!("event=app_exit module=cli status=ok reason={:?}", exit);
    log::logger().flush();

    Ok(())
}

/// Waits for the first interrupt on a background thread, then says goodbye and
/// exits with status 0. The command loop itself stays synchronous.
///
/// The signal handler is registered before this returns, so an interrupt that
/// arrives while the loop starts is still caught.
fn spawn_interrupt_watcher() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut interrupt = InterruptListener::install(&runtime)?;

    std::thread::Builder::new()
        .name("interrupt-watcher".to_string())
        .spawn(move || {
            if runtime.block_on(interrupt.recv()).is_none() {
                return;
            }
            info!("event=app_exit module=cli status=ok reason=interrupt");
            log::logger().flush();

            let mut stdout = io::stdout();
            let _ = writeln!(stdout, "\n{FAREWELL}");
            let _ = stdout.flush();
            std::process::exit(0);
        })?;

    Ok(())
}

/// Interrupt stream registered eagerly on the given runtime.
struct InterruptListener {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(windows)]
    inner: tokio::signal::windows::CtrlC,
}

impl InterruptListener {
    fn install(runtime: &tokio::runtime::Runtime) -> io::Result<Self> {
        let _guard = runtime.enter();
        #[cfg(unix)]
        let inner =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let inner = tokio::signal::windows::ctrl_c()?;
        Ok(Self { inner })
    }

    /// Resolves on the next interrupt; `None` if the stream closed.
    async fn recv(&mut self) -> Option<()> {
        self.inner.recv().await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::InterruptListener;
    use std::process::Command;

    #[test]
    fn interrupt_sent_right_after_install_is_caught() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let mut interrupt = InterruptListener::install(&runtime).unwrap();

        // No poll has happened yet; the default handler would kill the test.
        let status = Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        assert_eq!(runtime.block_on(interrupt.recv()), Some(()));
    }
}
