mod app;
mod audio;
mod config;
mod library;
mod mpris;
mod runtime;
mod ui;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("andante: {e}");
        std::process::exit(1);
    }
}
