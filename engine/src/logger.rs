use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

// Tick of the round being simulated; 0 outside a running round.
static CURRENT_TICK: AtomicU64 = AtomicU64::new(0);

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let tick = CURRENT_TICK.load(Ordering::Relaxed);
        println!("{}", format_line(&timestamp, self.prefix.as_deref(), tick, file, line, message));
    }
}

fn format_line(timestamp: &str, prefix: Option<&str>, tick: u64, file: &str, line: u32, message: &str) -> String {
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    let tick_tag = if tick > 0 { format!("[t{}]", tick) } else { String::new() };
    match prefix {
        Some(prefix) => format!("[{}][{}]{}[{}:{}] {}", timestamp, prefix, tick_tag, file_name, line, message),
        None => format!("[{}]{}[{}:{}] {}", timestamp, tick_tag, file_name, line, message),
    }
}

/// Later calls are ignored; the first prefix wins for the whole process.
pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

/// Stamps subsequent log lines with the simulation tick. The engine calls this as it
/// advances and resets.
pub fn set_tick(tick: u64) {
    CURRENT_TICK.store(tick, Ordering::Relaxed);
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
