use log::LevelFilter;
use std::io::Write;

pub fn init_logger_exe() {
    let name = std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_owned))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    init_logger(name);
}

// RUST_LOG takes precedence over the info defaults below
pub fn init_logger(name: impl Into<String>) {
    let crate_name = name.into().replace('-', "_");

    let result = env_logger::builder()
        .filter(Some(&crate_name), LevelFilter::Info)
        .filter(Some(env!("CARGO_CRATE_NAME")), LevelFilter::Info)
        .filter(Some("ocr_core"), LevelFilter::Info)
        .parse_default_env()
        .format(move |f, rec| {
            let now = humantime::format_rfc3339_millis(std::time::SystemTime::now());
            let module = rec.module_path().unwrap_or("<unknown>");
            let line = rec.line().unwrap_or(u32::MIN);
            let level = rec.level();

            writeln!(
                f,
                "[{} {} {} {}:{}] {}",
                level,
                crate_name,
                now,
                module,
                line,
                rec.args()
            )
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("logger already initialized: {}", e);
    }
}
